use std::error::Error;

use hand_std::alloc::{Allocator, Global};
use hand_std::collections::contiguous::Vector;
use hand_std::collections::hash::HashMap;
use hand_std::collections::linked::LinkedList;
use hand_std::collections::string::ByteString;

fn main() -> Result<(), Box<dyn Error>> {
    println!("\n[Allocator]\n");

    let slots = Global.allocate_slots::<i32>(3)?;
    // SAFETY: All three slots are constructed before being read, then destroyed and released.
    unsafe {
        for (i, value) in [10, 20, 30].into_iter().enumerate() {
            Global.construct(slots.add(i), value);
        }
        println!(
            "{} {} {}",
            *slots.as_ptr(),
            *slots.add(1).as_ptr(),
            *slots.add(2).as_ptr()
        );
        for i in 0..3 {
            Global.destroy(slots.add(i));
        }
        Global.deallocate_slots(slots, 3);
    }

    println!("\n[Vector]\n");

    let mut vec = Vector::new();
    for i in 1..=5 {
        vec.try_push(i)?;
        println!("len: {}, cap: {}, contents: {}", vec.len(), vec.cap(), vec);
    }
    println!("distance from begin to end: {}", vec.end() - vec.begin());

    println!("\n[HashMap]\n");

    let mut map = HashMap::new();
    for (i, fruit) in ["apple", "banana", "orange"].into_iter().enumerate() {
        map.try_insert(fruit, i)?;
    }
    println!("banana -> {:?}", map.find("banana"));
    map.erase("banana");
    println!("after erase: {map}");

    let mut numbers = HashMap::new();
    for i in 0..13 {
        numbers.try_insert(i, i * i)?;
        println!("len: {:>2}, buckets: {}", numbers.len(), numbers.bucket_count());
    }
    println!("{numbers:?}");

    println!("\n[LinkedList]\n");

    let mut list: LinkedList<_> = (1..=3).collect();
    list.push_front(0);
    list.insert(2, 100);
    println!("{list}");

    println!("\n[ByteString]\n");

    let mut greeting = ByteString::from("hello");
    greeting += " ";
    greeting += &ByteString::from("world");
    println!("{greeting} ({} bytes)", greeting.len());

    Ok(())
}
