fn main() {
    activity_logger::cli::run();
}
