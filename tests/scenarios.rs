use std::cell::{Cell, RefCell};
use std::future::Future;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use either::Either;
use lazyseq::prelude::*;

#[test]
fn test_consumer_trace_for_three_yields() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut seq = Generator::new({
        let log = Rc::clone(&log);
        move |co| async move {
            for v in 1..=3 {
                log.borrow_mut().push(format!("yield {v}"));
                co.yield_(v).await;
            }
            log.borrow_mut().push("return".to_string());
        }
    });

    let end = seq.end();
    let mut it = seq.begin();
    while it != end {
        log.borrow_mut().push(format!("read {}", *it.current()));
        it.advance().unwrap();
    }

    assert_eq!(
        *log.borrow(),
        vec![
            "yield 1", "read 1", "yield 2", "read 2", "yield 3", "read 3", "return",
        ]
    );
    assert_eq!(it.advance(), Err(GeneratorError::InvalidResume));
}

#[test]
fn test_silent_producer_yields_nothing() {
    let ran = Rc::new(Cell::new(false));
    let mut seq: Generator<'_, String> = Generator::new({
        let ran = Rc::clone(&ran);
        move |_co| async move {
            ran.set(true);
        }
    });

    let end = seq.end();
    assert!(seq.begin() == end);
    assert!(ran.get());
    assert!(seq.is_done());
}

#[test]
fn test_panic_while_producing_propagates_once() {
    let mut seq = Generator::new(|co| async move {
        co.yield_(String::from("ok")).await;
        let broken: Option<String> = None;
        co.yield_(broken.expect("value could not be built")).await;
    });

    let mut it = seq.begin();
    assert_eq!(it.current().as_str(), "ok");

    let outcome = catch_unwind(AssertUnwindSafe(|| it.advance()));
    assert!(outcome.is_err());
    assert!(it.is_end());
    assert!(it == Iter::end());
    assert!(it.try_current().is_err());
    drop(it);

    assert!(seq.is_done());
    assert!(!seq.is_empty());
    assert!(seq.begin().is_end());
    assert!(format!("{seq:?}").contains("Failed"));
}

#[test]
fn test_foreign_await_surfaces_from_try_begin() {
    struct Later;

    impl Future for Later {
        type Output = ();
        fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
            Poll::Pending
        }
    }

    let mut seq: Generator<'_, u8> = Generator::new(|_co| async move {
        Later.await;
    });
    assert_eq!(seq.try_begin().err(), Some(GeneratorError::ForeignAwait));
    assert!(seq.is_done());
}

#[test]
fn test_either_body_selects_producer_statically() {
    fn numbers<'a>(descending: bool) -> Generator<'a, u32> {
        let body = if descending {
            let mut n = 4;
            Either::Left(from_fn(move || {
                n -= 1;
                if n > 0 {
                    Step::Yielded(n)
                } else {
                    Step::Complete(())
                }
            }))
        } else {
            Either::Right(repeat_with(|| 1))
        };
        Generator::from_body(body)
    }

    assert_eq!(numbers(true).into_iter().collect::<Vec<_>>(), vec![3, 2, 1]);
    assert_eq!(
        numbers(false).into_iter().take(4).collect::<Vec<_>>(),
        vec![1, 1, 1, 1]
    );
}

#[test]
fn test_infinite_producer_stops_with_owner() {
    let resumes = Rc::new(Cell::new(0));
    let mut seq = Generator::new({
        let resumes = Rc::clone(&resumes);
        move |co| async move {
            let mut n = 0u64;
            loop {
                resumes.set(resumes.get() + 1);
                co.yield_(n).await;
                n += 1;
            }
        }
    });

    let firsts: Vec<u64> = (&mut seq).into_iter().take(5).collect();
    assert_eq!(firsts, vec![0, 1, 2, 3, 4]);
    assert_eq!(resumes.get(), 5);

    seq.reset();
    assert_eq!(resumes.get(), 5);
    assert!(seq.is_empty());
    assert!(seq.is_done());
}

#[test]
fn test_borrowed_elements_keep_identity() {
    let table = [String::from("x"), String::from("y"), String::from("z")];
    let rows = &table;
    let seq = Generator::new(move |co| async move {
        for row in rows.iter().rev() {
            co.yield_(row).await;
        }
    });

    let seen: Vec<&String> = seq.into_iter().collect();
    assert!(std::ptr::eq(seen[0], &table[2]));
    assert!(std::ptr::eq(seen[2], &table[0]));
}

#[test]
fn test_for_loop_over_borrowed_generator() {
    let mut seq = Generator::from_fn({
        let mut words = "one two three".split(' ');
        move || Step::from(words.next())
    });

    let mut lengths = Vec::new();
    for word in &mut seq {
        lengths.push(word.len());
    }
    assert_eq!(lengths, vec![3, 3, 5]);
    assert!(seq.is_done());
}
