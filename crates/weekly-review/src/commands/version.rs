pub fn run() -> anyhow::Result<()> {
    println!("weekly-review {}", env!("CARGO_PKG_VERSION"));
    println!("AI review of weekly markdown reports");
    Ok(())
}
