//! Example: send and verify an SMS code through the configured provider
//!
//! Reads `ALIYUN_*`, `THROTTLE_*` and `REDIS_URL` from the environment (or
//! a `.env` file), sends a code to the given phone number and then verifies
//! whatever code is typed on stdin.
//!
//! Run with: cargo run --example send_code_demo -p vg_infra -- 13812345678

use anyhow::{bail, Context};
use std::io::BufRead;
use std::net::{IpAddr, Ipv4Addr};

use vg_core::RequestContext;
use vg_infra::build_gateway;
use vg_shared::{init_tracing, GatewayConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = GatewayConfig::from_env();
    init_tracing(&config.logging);

    let phone = match std::env::args().nth(1) {
        Some(phone) => phone,
        None => bail!("usage: send_code_demo <phone>"),
    };

    let gateway = build_gateway(&config)
        .await
        .context("failed to initialise the gateway")?;
    let context = RequestContext::new(IpAddr::V4(Ipv4Addr::LOCALHOST));

    let sent = gateway.send_sms_code(&phone, &context, None, None).await?;
    println!(
        "Code sent to {} (biz id {:?}); next resend allowed at {}",
        sent.phone, sent.biz_id, sent.next_resend_at
    );

    println!("Enter the code you received:");
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read code")?;

    match gateway.verify_sms_code(&phone, line.trim()).await {
        Ok(result) => println!("Verified {}", result.phone),
        Err(e) => println!("Verification failed (code {}): {}", e.code(), e),
    }

    Ok(())
}
