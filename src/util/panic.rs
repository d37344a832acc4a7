/// Runs a block that is expected to panic, failing the test if it doesn't. Evaluates to the panic
/// message, so tests can check which failure was reported.
#[allow(unused_macros)]
macro_rules! assert_panics {
    ($run:block) => {
        assert_panics!($run, "the block was expected to panic")
    };
    ($run:block, $msg:literal) => {{
        let payload = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $run))
            .expect_err($msg);
        match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => payload
                .downcast::<&str>()
                .map(|message| message.to_string())
                .unwrap_or_default(),
        }
    }};
}

#[allow(unused_imports)]
pub(crate) use assert_panics;
