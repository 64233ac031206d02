//! Serves a range of memory pages over UDP for `six502-run --remote`.

use std::net::{IpAddr, SocketAddr, UdpSocket};

use anyhow::{Context, Result};
use clap::Parser;
use six502::{PageServer, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "six502-server")]
#[command(about = "Serve 6502 memory pages over UDP", long_about = None)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    ip: IpAddr,

    /// UDP port to bind
    #[arg(long, default_value_t = six502::server::DEFAULT_SERVER_PORT)]
    port: u16,

    /// First page served (inclusive)
    #[arg(long, default_value_t = 1)]
    start_page: u8,

    /// Last page served (inclusive)
    #[arg(long, default_value_t = 255)]
    stop_page: u8,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = ServerConfig {
        bind: SocketAddr::new(args.ip, args.port),
        start_page: args.start_page,
        stop_page: args.stop_page,
    };
    let mut server = PageServer::from_config(&config)?;
    let socket = UdpSocket::bind(config.bind)
        .with_context(|| format!("failed to bind {}", config.bind))?;

    match server.serve(&socket).context("page server stopped")? {}
}
