//! Demo: tracking a gradient-descent run.
//!
//! Run with:
//! ```bash
//! cargo run --example demo --features full
//! ```

use osservabili::observables::{named, Context, Value};
use osservabili::observers::json::JsonView;
use osservabili::observers::table::{TableStyle, TableView};
use osservabili::registry::Registry;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Minimize f(x) = (x - 3)^2 with fixed-step gradient descent, tracking
    // the iterate, the loss, and the gradient at every step.
    let mut registry = Registry::from_observables([
        named("x", |cx: &Context| Ok(cx.require_arg(0)?.clone())),
        named("loss", |cx: &Context| {
            let x = cx.require_arg(0)?.expect_f64()?;
            Ok(Value::from((x - 3.0).powi(2)))
        }),
        named("grad", |cx: &Context| {
            let x = cx.require_arg(0)?.expect_f64()?;
            Ok(Value::from(2.0 * (x - 3.0)))
        }),
        named("lr", |cx: &Context| Ok(cx.require("lr")?.clone())),
    ])?;

    let lr = 0.1;
    let mut x = 0.0_f64;
    for _ in 0..25 {
        registry.update(&Context::new().arg(x).with("lr", lr))?;
        x -= lr * 2.0 * (x - 3.0);
    }

    let view = TableView::new()
        .with_style(TableStyle::Rounded)
        .with_title("gradient descent on (x - 3)^2, last 10 steps")
        .step_column(true)
        .tail(10);
    println!("{}", view.render(&registry));

    println!();
    println!("{}", JsonView::new().pretty(true).to_json(&registry)?);

    Ok(())
}
