// Keep the binary thin; everything lives in the library so it can be tested.
fn main() {
    if let Err(err) = pots_tracker_lib::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
