mod config;
mod studio;

use ductus_engine::device::GpuInit;
use ductus_engine::logging::{init_logging, LoggingConfig};
use ductus_engine::window::Runtime;

use config::StudioConfig;
use studio::Studio;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = StudioConfig::from_env()?;

    // Startup banner, printed before the window opens.
    println!();
    println!("  ╔════════════════════════════════════════╗");
    println!("  ║            DUCTUS SKETCHPAD            ║");
    println!("  ║     wgpu renderer  ·  shape tools      ║");
    println!("  ╠════════════════════════════════════════╣");
    println!("  ║  L  line          K  bresenham line    ║");
    println!("  ║  3-6  n-gon       S  scanline polygon  ║");
    println!("  ║  F  lock scanline polygon              ║");
    println!("  ║  Up/Down  fill density  Space  fill    ║");
    println!("  ║  R G B W  tint the shape being drawn   ║");
    println!("  ║  H  hide newest   Backspace  remove    ║");
    println!("  ║  C  clear         Esc  quit            ║");
    println!("  ╚════════════════════════════════════════╝");
    println!();

    let runtime = config.runtime();
    Runtime::run(runtime, GpuInit::default(), Studio::new(config))
}
