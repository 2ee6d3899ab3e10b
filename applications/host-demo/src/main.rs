//! Host-side demo: the interpreter behind a TCP console.
//!
//! Run it, then `nc 127.0.0.1 2323` (or point a lab GUI at the port) and
//! type commands terminated by Enter. `ListCommands` shows what is
//! registered. Up to four clients are served concurrently, each with its
//! own line buffer.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicI32, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use libcmd::shell::{Args, CommandResult, Interpreter, Mux, Reply};
use libcmd::transport::std_net::{TcpListenerTransport, TcpTransport};

static PURGE_LEVEL: AtomicI32 = AtomicI32::new(0);
static STARTED: OnceLock<Instant> = OnceLock::new();

fn set_purge(args: &Args<'_>, _reply: &mut dyn Reply) -> CommandResult {
    if args.count() != 1 {
        return Err(libcmd::shell::Error::Rejected(
            "Command expects 1 argument.",
        ));
    }
    let level = args.int(1)?;
    PURGE_LEVEL.store(level, Ordering::Relaxed);
    Ok(Some("SUCCESS: Purge level set."))
}

fn get_purge(_args: &Args<'_>, reply: &mut dyn Reply) -> CommandResult {
    let level = PURGE_LEVEL.load(Ordering::Relaxed);
    reply.reply(&level.to_string());
    Ok(None)
}

fn echo(args: &Args<'_>, reply: &mut dyn Reply) -> CommandResult {
    reply.reply(args.string(1)?);
    Ok(Some("SUCCESS: Command executed and echoed back your argument."))
}

fn uptime(_args: &Args<'_>, reply: &mut dyn Reply) -> CommandResult {
    let secs = STARTED
        .get()
        .map(|started| started.elapsed().as_secs())
        .unwrap_or(0);
    reply.reply(&format!("uptime: {secs}s"));
    Ok(None)
}

fn main() {
    let _ = STARTED.set(Instant::now());

    let mut interp = Interpreter::new();
    interp
        .register("SetPurge", "Set the purge level (int).", set_purge)
        .unwrap();
    interp
        .register("GetPurge", "Read back the purge level.", get_purge)
        .unwrap();
    interp
        .register("Echo", "Echo back a single argument.", echo)
        .unwrap();
    interp
        .register("Uptime", "Seconds since startup.", uptime)
        .unwrap();

    let mut listener =
        TcpListenerTransport::bind("127.0.0.1:2323").expect("failed to bind console port");
    println!(
        "command console on {}",
        listener.local_addr().expect("listener has no address")
    );

    let mut mux: Mux<TcpTransport> = Mux::new();
    loop {
        mux.accept_from(&mut listener);
        mux.poll(&interp);
        thread::sleep(Duration::from_millis(5));
    }
}
