fn main() {
    zen::app::cli::run();
}
