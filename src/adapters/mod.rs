//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements          | Connects to                   |
//! |-------------|---------------------|-------------------------------|
//! | `hal`       | ButtonPort          | `embedded-hal` input pins     |
//! |             | TxPort              | `embedded-hal` PWM + timer    |
//! | `hardware`  | ButtonPort + TxPort | one button and one tx registry|
//! | `log_sink`  | EventSink           | Serial log output             |
//! | `time`      | Clock               | ESP32 system timer            |

pub mod hal;
pub mod hardware;
pub mod log_sink;
pub mod time;
