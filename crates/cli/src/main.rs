fn main() {
    if let Err(error) = xpathkit_cli::run() {
        // run() installs the subscriber right after argument parsing.
        tracing::error!(error = %format!("{error:#}"), "xpathkit failed");
        std::process::exit(1);
    }
}
