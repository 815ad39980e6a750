//! Fuzz target for condition expressions.
//!
//! Parsing is total: any string yields a condition, and re-parsing its display form
//! yields the same condition.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_condition_parser
//! ```

#![no_main]

use kubecheck_domain::{Condition, Container};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&str, &str)| {
    let (expr, image) = data;
    let cond = Condition::parse(expr);
    assert_eq!(Condition::parse(&cond.to_string()), cond);

    let container = Container {
        name: "fuzz".to_string(),
        image: image.to_string(),
        ..Container::default()
    };
    let _ = cond.evaluate(&container);
});
