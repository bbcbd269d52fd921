fn main() {
    // ESP-IDF link arguments are only needed when building the firmware
    // image; host test builds skip embuild entirely.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
