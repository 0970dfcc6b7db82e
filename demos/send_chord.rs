//! Send a C-major chord to a MUDP receiver
//!
//! Usage: `cargo run --example send_chord -- <host:port>`

use std::net::SocketAddr;
use std::thread;
use std::time::Duration;

use mudp::{DEFAULT_PORT, MidiMessage, Sender, TransportConfig};

const CHORD: [u8; 3] = [60, 64, 67];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let target: SocketAddr = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
    };

    println!("MUDP Chord Example");
    println!("==================\n");
    println!("Target: {target}");

    let sender = Sender::connect(target, &TransportConfig::default())?;

    let on: Vec<MidiMessage> = CHORD
        .iter()
        .map(|&note| MidiMessage::note_on(0, note, 100))
        .collect();
    sender.send(&on)?;
    println!("Sent: Note On {CHORD:?}");

    thread::sleep(Duration::from_secs(1));

    let off: Vec<MidiMessage> = CHORD
        .iter()
        .map(|&note| MidiMessage::note_off(0, note, 0))
        .collect();
    sender.send(&off)?;
    println!("Sent: Note Off {CHORD:?}");

    let stats = sender.metrics();
    println!(
        "\n{} packets, {} messages, {} bytes",
        stats.packets_sent, stats.messages_sent, stats.bytes_sent
    );

    Ok(())
}
