//! Interactive mode for the server.
//!
//! Prompts the user for bind address, port and data files before starting
//! the server.

use dialoguer::{Confirm, Input};
use house_price_estimate::config::{DEFAULT_MODEL_PATH, DEFAULT_REFERENCE_PATH};

fn prompt(label: &str, env_key: &str, default: &str) -> String {
    let default = std::env::var(env_key).unwrap_or_else(|_| default.to_string());
    Input::new()
        .with_prompt(label)
        .default(default.clone())
        .interact_text()
        .unwrap_or(default)
}

/// Runs the server in interactive mode, prompting for configuration.
///
/// Asks the user for a bind address, port, reference data path and model
/// path, sets the corresponding environment variables (`BIND_ADDR`,
/// `PORT`, `REFERENCE_DATA_PATH`, `MODEL_PATH`), and delegates to
/// [`super::run_server`].
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run() -> std::io::Result<()> {
    println!("House Price Server");
    println!();

    let bind_addr = prompt("Bind address", "BIND_ADDR", "127.0.0.1");
    let port_str = prompt("Port", "PORT", "8080");
    let reference_path = prompt("Reference data", "REFERENCE_DATA_PATH", DEFAULT_REFERENCE_PATH);
    let model_path = prompt("Model artifact", "MODEL_PATH", DEFAULT_MODEL_PATH);

    // SAFETY: We are single-threaded at this point (before server starts) and
    // these variables are only read once during server initialisation.
    unsafe {
        std::env::set_var("BIND_ADDR", &bind_addr);
        std::env::set_var("PORT", &port_str);
        std::env::set_var("REFERENCE_DATA_PATH", &reference_path);
        std::env::set_var("MODEL_PATH", &model_path);
    }

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{port_str}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server().await
}
