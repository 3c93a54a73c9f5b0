//! Appointment PIN codes.
//!
//! The family receives the PIN by email and hands it to the educator at the end of the
//! session; the educator entering it is what releases the payment.

use rand::Rng;

/// Codes too easy to guess to be handed out.
pub const BLOCKED_PINS: [&str; 14] = [
    "0000", "1111", "2222", "3333", "4444", "5555", "6666", "7777", "8888", "9999", "1234",
    "4321", "0123", "9876",
];

/// Wrong entries allowed before the PIN locks.
pub const MAX_PIN_ATTEMPTS: i32 = 3;

pub fn is_blocked(pin: &str) -> bool {
    BLOCKED_PINS.contains(&pin)
}

/// Draws a uniformly random 4 digit PIN outside [`BLOCKED_PINS`].
pub fn generate_pin() -> String {
    generate_pin_with(&mut rand::rng())
}

pub fn generate_pin_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    loop {
        let pin = format!("{:04}", rng.random_range(0..10_000u32));
        if !is_blocked(&pin) {
            return pin;
        }
    }
}
