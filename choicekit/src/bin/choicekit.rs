use choicekit::app::ChoicekitApp;
use clap::Parser;

fn main() {
    env_logger::init();
    let args = ChoicekitApp::parse();
    if let Err(e) = args.run() {
        log::error!("choicekit failed: {e}");
        std::process::exit(1);
    }
}
