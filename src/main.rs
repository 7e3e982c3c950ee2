fn main() {
    #[cfg(target_arch = "wasm32")]
    vitrina::run();
}
