fn main() {
    storyframe::app::cli::run();
}
