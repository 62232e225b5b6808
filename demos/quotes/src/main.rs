use anyhow::Result;
use lull_core::prelude::*;

const QUOTES: &[&str] = &[
    "The cheapest, fastest, and most reliable components are those that aren't there.",
    "Deleted code is debugged code.",
    "A program that produces incorrect results twice as fast is infinitely slower.",
];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
enum QuoteError {
    #[error("no quote with id {0}")]
    NotFound(usize),
}

// Stand-in for a network hop: one suspension point, then the result.
async fn fetch_quote(id: usize) -> Result<String, QuoteError> {
    yield_now().await;
    QUOTES
        .get(id)
        .map(|q| q.to_string())
        .ok_or(QuoteError::NotFound(id))
}

fn quote_screen(id: usize, skip: bool) -> (AsyncState<String, QuoteError>, Trigger) {
    let (state, refresh) = remember_async(move || fetch_quote(id), id, skip);
    (state.get(), refresh)
}

/// Drives the render/executor loop until the load for `id` settles.
fn settle(
    host: &mut Composition,
    id: usize,
    skip: bool,
) -> Result<AsyncState<String, QuoteError>> {
    let (mut snap, _) = host.render_until_settled(8, || quote_screen(id, skip))?;
    while snap.loading {
        run_until_idle();
        (snap, _) = host.render_until_settled(8, || quote_screen(id, skip))?;
    }
    Ok(snap)
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("catalog has {} quotes", QUOTES.len());

    let mut host = Composition::new();

    // Mount: loads automatically.
    let quote = settle(&mut host, 0, false)?;
    println!("quote 0: {}", quote.data.unwrap_or_default());

    // Dependency change: reloads automatically.
    let quote = settle(&mut host, 1, false)?;
    println!("quote 1: {}", quote.data.unwrap_or_default());

    // An id outside the catalog surfaces the producer's error.
    let missing = settle(&mut host, 9, false)?;
    if let Some(err) = missing.error {
        println!("quote 9: {err}");
    }

    // With skip set, a dependency change records the key but stays quiet
    // until the trigger is fired by hand.
    let (_, refresh) = host.render(|| quote_screen(1, true));
    refresh.fire();
    let refreshed = settle(&mut host, 1, true)?;
    println!("refreshed 1: {}", refreshed.data.unwrap_or_default());

    host.dispose();
    Ok(())
}
