/// Erases the screen and homes the cursor.
pub const CLEAR_SEQUENCE: &str = "\x1b[2J\x1b[1;1H";

pub fn about_text() -> String {
    format!(
        "Web3 Terminal - Your Gateway to the Blockchain\n\
         Version: {version}\n\
         Repository: {repository}\n\
         License: {license}\n\
         \n\
         A command-line interface for interacting with Web3 and blockchain networks.\n\
         Type 'help' to see available commands.",
        version = env!("CARGO_PKG_VERSION"),
        repository = env!("CARGO_PKG_REPOSITORY"),
        license = env!("CARGO_PKG_LICENSE"),
    )
}
