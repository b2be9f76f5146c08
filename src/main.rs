fn main() {
    if let Err(err) = mastosky::cli::main() {
        eprintln!("❌ {err}");
        std::process::exit(1);
    }
}
