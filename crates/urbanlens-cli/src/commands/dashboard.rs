use anyhow::Result;

pub fn run(api: Option<&str>, offline: bool) -> Result<()> {
    let provider = super::make_provider(api, offline);
    let mut app = crate::tui::app::App::new(provider);
    if let Err(e) = app.run() {
        eprintln!("TUI error: {e}");
        std::process::exit(1);
    }
    Ok(())
}
