//! A small tour: build a table, clean it, join it, ship it as bytes.
//!
//! Run with `cargo run --example quickstart`.
use strata::prelude::*;

fn main() -> StrataResult<()> {
    let mut trades = df!(
        "ticker" => ["APX", "APX", "BRL", "BRL", "BRL"],
        "price" => [Some(101.5f64), None, Some(7.25), Some(7.40), Some(7.40)],
        "size" => [100i64, 250, 500, 500, 500]
    )?;

    println!("{trades}");
    println!("{}", trades.info());

    trades.ffill(&["price"])?;
    trades.drop_duplicates(&[])?;
    println!("after cleaning:\n{trades}");

    let listings = df!(
        "ticker" => ["APX", "BRL"],
        "exchange" => ["NYSE", "AMS"]
    )?;
    let enriched = trades.inner_join(&listings, &["ticker"])?;
    println!("joined:\n{enriched}");

    println!("mean price: {:.4}", enriched.mean("price")?);
    println!("{}", enriched.describe()?);

    let bytes = to_bytes(&enriched);
    let restored = from_bytes(&bytes)?;
    assert_eq!(restored, enriched);
    println!("binary round-trip ok ({} bytes)", bytes.len());

    Ok(())
}
