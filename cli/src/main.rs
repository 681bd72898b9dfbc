fn main() {
    if let Err(e) = bwfilter_cli_lib::run() {
        tracing::error!("{:#}", e);
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
