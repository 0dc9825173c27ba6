fn main() {
    intunify::app::cli::run();
}
