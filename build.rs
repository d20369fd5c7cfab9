fn main() {
    // Only the ESP-IDF build needs the exported linker/cfg arguments; host builds run the simulator.
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }
}
