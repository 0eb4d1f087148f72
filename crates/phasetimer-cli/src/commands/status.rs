use phasetimer_core::Config;

/// Print the snapshot a freshly started `run` would show.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let snapshot = config.timer().snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
