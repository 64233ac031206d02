//! Runs a raw 6502 program image against local memory or a page server.
//!
//! ```text
//! six502-run --image prog.bin --load-addr 0x8000 --reset-vector 0x8000 --max-steps 100
//! six502-run --image prog.bin --remote 127.0.0.1:6503
//! ```

use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use six502::memory::RESET_VECTOR;
use six502::{ClientConfig, FlatMemory, MemoryBus, RemoteMemory, CPU};

#[derive(Parser, Debug)]
#[command(name = "six502-run")]
#[command(about = "Run a 6502 program image", long_about = None)]
struct Args {
    /// Raw binary image to load
    #[arg(long)]
    image: PathBuf,

    /// Address the image is loaded at (decimal, 0x.. or $..)
    #[arg(long, default_value = "0x8000", value_parser = parse_u16)]
    load_addr: u16,

    /// Write this address into the reset vector at 0xFFFC before starting
    #[arg(long, value_parser = parse_u16)]
    reset_vector: Option<u16>,

    /// Use the page server at this address instead of local memory
    #[arg(long)]
    remote: Option<SocketAddr>,

    /// Local address for the remote memory client
    #[arg(long, default_value = "127.0.0.1:0")]
    listen: SocketAddr,

    /// Give up on a page fetch after this many milliseconds (waits forever if unset)
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Stop after this many instructions instead of running until an error
    #[arg(long)]
    max_steps: Option<u64>,
}

fn parse_u16(text: &str) -> Result<u16, String> {
    let parsed = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix('$')) {
        u16::from_str_radix(hex, 16)
    } else {
        text.parse()
    };
    parsed.map_err(|e| format!("invalid address {:?}: {}", text, e))
}

fn load<M: MemoryBus>(memory: &mut M, args: &Args, image: &[u8]) -> Result<()> {
    if args.load_addr as usize + image.len() > six502::memory::ADDRESS_SPACE {
        bail!(
            "{} byte image does not fit at 0x{:04X}",
            image.len(),
            args.load_addr
        );
    }
    for (i, byte) in image.iter().enumerate() {
        memory.write(args.load_addr + i as u16, *byte)?;
    }
    if let Some(vector) = args.reset_vector {
        let [lo, hi] = vector.to_le_bytes();
        memory.write(RESET_VECTOR, lo)?;
        memory.write(RESET_VECTOR + 1, hi)?;
    }
    Ok(())
}

fn execute<M: MemoryBus>(mut memory: M, args: &Args, image: &[u8]) -> Result<()> {
    load(&mut memory, args, image)?;
    let mut cpu = CPU::new(memory);

    let outcome = match args.max_steps {
        Some(max_steps) => cpu
            .reset()
            .and_then(|()| cpu.run_for(max_steps))
            .map(|steps| info!("stopped after {} instructions", steps)),
        None => match cpu.run() {
            Ok(never) => match never {},
            Err(e) => Err(e),
        },
    };

    let regs = cpu.registers();
    println!(
        "pc={:04X} a={:02X} x={:02X} y={:02X} sp={:02X} status={:08b} steps={}",
        regs.pc,
        regs.a,
        regs.x,
        regs.y,
        regs.sp,
        cpu.status(),
        cpu.steps()
    );

    outcome.context("execution stopped")
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let image = fs::read(&args.image)
        .with_context(|| format!("failed to read {}", args.image.display()))?;

    match args.remote {
        Some(remote) => {
            let config = ClientConfig {
                listen: args.listen,
                remote,
                response_timeout: args.timeout_ms.map(Duration::from_millis),
                ..ClientConfig::default()
            };
            let memory = RemoteMemory::connect(&config)
                .with_context(|| format!("failed to start remote memory for {}", remote))?;
            execute(memory, &args, &image)
        }
        None => execute(FlatMemory::new(), &args, &image),
    }
}
