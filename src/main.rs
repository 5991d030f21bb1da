fn main() {
    if let Err(err) = activity_heatmap::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
