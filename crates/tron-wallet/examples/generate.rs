//! Generate (or restore) a wallet and print its first few addresses.
//!
//! ```text
//! cargo run -p tron-wallet --example generate            # new 12-word wallet
//! cargo run -p tron-wallet --example generate -- 24      # new 24-word wallet
//! TRON_MNEMONIC="abandon ... about" cargo run -p tron-wallet --example generate
//! ```
//!
//! Set `RUST_LOG=tron_wallet=debug` to see each derivation path.

use tracing::info;
use tracing_subscriber::EnvFilter;
use tron_wallet::{private_key_to_hex, MnemonicLength, Wallet};

const ADDRESS_COUNT: u32 = 5;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let wallet = match std::env::var("TRON_MNEMONIC") {
        Ok(phrase) => {
            info!("restoring wallet from TRON_MNEMONIC");
            Wallet::restore(phrase.trim())?
        }
        Err(_) => {
            let length = match std::env::args().nth(1).as_deref() {
                Some("24") => MnemonicLength::Words24,
                _ => MnemonicLength::Words12,
            };
            info!(words = length.word_count(), "generating new wallet");
            let wallet = Wallet::new(length)?;
            println!("mnemonic: {}", wallet.mnemonic());
            wallet
        }
    };

    for index in 0..ADDRESS_COUNT {
        let key = wallet.derive(index)?;
        let address = wallet.address(index)?;
        println!("{index}  {address}  {}", private_key_to_hex(&key));
    }
    Ok(())
}
