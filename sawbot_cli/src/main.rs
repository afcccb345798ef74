use clap::Parser;
use sawbot_link::{Direction, Gesture, Mode, RobotLink, Session, CONTROL_PORT};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sawbot_cli", about = "Terminal remote control for the saw robot")]
struct Args {
    /// Robot IPv4 address; connects immediately when given, otherwise the
    /// first prompt asks for it.
    #[arg(long)]
    addr: Option<String>,

    /// Control port the robot listens on.
    #[arg(long, default_value_t = CONTROL_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let (event_tx, mut events) = mpsc::unbounded_channel();
    let link = RobotLink::spawn_with_port(args.port, event_tx);
    let mut session = Session::new(link.sender());

    if let Some(addr) = args.addr {
        session.set_address_text(addr);
        if let Err(e) = session.connect() {
            println!("error: {e}");
        }
    }

    print_help();
    prompt(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                let notice = session.handle_link_event(event);
                println!("{notice}");
                prompt(&session);
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_line(&mut session, line.trim()) {
                    break;
                }
                prompt(&session);
            }
        }
    }

    session.disconnect();
    Ok(())
}

/// Returns false when the user asked to quit.
fn handle_line(session: &mut Session, line: &str) -> bool {
    match session.mode() {
        Mode::AwaitingAddress => match line {
            "q" | "quit" => return false,
            "h" | "help" => print_help(),
            "" => {}
            addr => {
                session.set_address_text(addr);
                if let Err(e) = session.connect() {
                    println!("error: {e}");
                }
            }
        },
        Mode::Controlling => {
            let gesture = match line {
                "q" | "quit" => {
                    session.disconnect();
                    return false;
                }
                "d" => {
                    session.disconnect();
                    return true;
                }
                "h" | "help" => {
                    print_help();
                    return true;
                }
                "f" => Gesture::DirectionalStart(Direction::Forward),
                "b" => Gesture::DirectionalStart(Direction::Backward),
                "l" => Gesture::DirectionalStart(Direction::Left),
                "r" => Gesture::DirectionalStart(Direction::Right),
                "" | "s" => Gesture::DirectionalEnd,
                "p" => Gesture::PowerPress,
                "t" => Gesture::ToolPress,
                other => {
                    println!("unknown input {other:?} (h for help)");
                    return true;
                }
            };
            match session.gesture(gesture) {
                Ok(command) => tracing::debug!(?command, "sent"),
                Err(e) => println!("error: {e}"),
            }
        }
    }
    true
}

fn prompt(session: &Session) {
    match session.mode() {
        Mode::AwaitingAddress if session.connect_pending() => print!("connecting... "),
        Mode::AwaitingAddress => print!("robot ip> "),
        Mode::Controlling => {
            let saw = if session.saw_on() { "saw on" } else { "saw off" };
            print!("control [{saw}]> ");
        }
    }
    let _ = std::io::stdout().flush();
}

fn print_help() {
    println!("at the ip prompt: enter the robot's IPv4 address to connect, q to quit");
    println!("while controlling:");
    println!("  f/b/l/r  press forward/backward/left/right");
    println!("  s (or empty line)  release, sends stop");
    println!("  p  power on/off");
    println!("  t  toggle the saw");
    println!("  d  disconnect, q  quit");
}
