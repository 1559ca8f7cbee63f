fn main() {
    // Forwards ESP-IDF build environment to rustc when flashing; a no-op
    // when the espidf feature (and toolchain) is absent.
    embuild::espidf::sysenv::output();
}
