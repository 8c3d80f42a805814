//! keytone CLI: audition the audio-feedback engine on a desktop.
//!
//! Usage:
//!   keytone startup
//!   keytone on | off | toggle | status
//!   keytone clicky
//!   keytone tone <hz> [ms]
//!   keytone chord <hz> <hz> [hz...] [--rate units]
//!   keytone click [delay_ms] [hz] [ms]
//!   keytone scale [bpm]
//!
//! Settings are kept in `$KEYTONE_CONFIG` (default: a file in the temp dir).
//! Set `RUST_LOG=debug` to watch the engine.

use kt_core::songs::SCALE_SONG;
use kt_core::{frequency_to_midi, Song, Tempo};
use kt_host::{DesktopAudio, TICK_RATE_HZ};
use std::path::PathBuf;
use std::time::Duration;
use std::{env, thread};

const MELODY_TIMEOUT: Duration = Duration::from_secs(30);
const CHORD_LENGTH: Duration = Duration::from_secs(2);

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let Some(command) = args.get(1) else {
        usage();
    };

    let audio = DesktopAudio::open(config_path()).unwrap_or_else(|e| {
        eprintln!("Failed to open audio: {}", e);
        std::process::exit(1);
    });
    log::info!("audio open at {} Hz", audio.sample_rate());

    match command.as_str() {
        "startup" => {
            audio.engine().with(|e| e.init());
            wait(&audio);
        }
        "on" => {
            audio.engine().with(|e| e.on());
            wait(&audio);
        }
        "off" => {
            audio.engine().with(|e| e.off());
            wait(&audio);
        }
        "toggle" => {
            audio.engine().with(|e| e.toggle());
            wait(&audio);
        }
        "clicky" => {
            let on = audio.engine().with(|e| {
                e.clicky_toggle();
                e.is_clicky_on()
            });
            println!("Clicky: {}", if on { "on" } else { "off" });
        }
        "status" => status(&audio),
        "tone" => {
            let frequency = parse_arg(&args, 2, 440.0);
            let ms = parse_arg(&args, 3, 500u64);
            match frequency_to_midi(frequency) {
                Some(note) => println!("{} Hz (MIDI {})", frequency, note),
                None => println!("{} Hz", frequency),
            }
            play_tones(&audio, &[frequency], Duration::from_millis(ms));
        }
        "chord" => chord(&audio, &args[2..]),
        "click" => {
            let delay = parse_arg(&args, 2, 0u16);
            let frequency = parse_arg(&args, 3, 2000.0);
            let ms = parse_arg(&args, 4, 30u16);
            audio.engine().with(|e| e.play_click(delay, frequency, ms));
            wait(&audio);
        }
        "scale" => {
            let bpm = parse_arg(&args, 2, Tempo::DEFAULT.bpm());
            let song = Song::once(SCALE_SONG);
            let units = Tempo::new(bpm).note_length(song.total_duration());
            println!(
                "Scale: {} notes, {:.2} s",
                song.len(),
                units / TICK_RATE_HZ as f32
            );
            audio.engine().with(|e| {
                e.set_tempo(bpm);
                e.play_song(&song);
            });
            wait(&audio);
        }
        _ => usage(),
    }

    audio.close();
}

fn usage() -> ! {
    eprintln!(
        "Usage: keytone <startup|on|off|toggle|status|clicky|tone|chord|click|scale> [args]"
    );
    std::process::exit(1);
}

fn config_path() -> PathBuf {
    env::var_os("KEYTONE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| env::temp_dir().join("keytone.cfg"))
}

fn parse_arg<T: std::str::FromStr>(args: &[String], index: usize, default: T) -> T {
    match args.get(index) {
        Some(arg) => arg.parse().unwrap_or_else(|_| {
            eprintln!("Invalid argument: {}", arg);
            std::process::exit(1);
        }),
        None => default,
    }
}

fn wait(audio: &DesktopAudio) {
    if !audio.wait_for_melody(MELODY_TIMEOUT) {
        eprintln!("Melody did not finish in {:?}", MELODY_TIMEOUT);
    }
    // Let the last buffer drain
    thread::sleep(Duration::from_millis(50));
}

fn status(audio: &DesktopAudio) {
    let (config, tempo) = audio.engine().with(|e| {
        // Any playback call loads the stored settings
        e.stop_all();
        (e.config(), e.tempo())
    });
    println!("Audio:  {}", if config.is_enabled() { "on" } else { "off" });
    println!("Clicky: {}", if config.is_clicky() { "on" } else { "off" });
    println!("Tempo:  {} BPM", tempo.bpm());
    println!("Config: {:#04x}", config.raw());
}

fn chord(audio: &DesktopAudio, args: &[String]) {
    let mut frequencies = Vec::new();
    let mut rate = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--rate" {
            rate = iter.next().and_then(|r| r.parse::<f32>().ok());
            if rate.is_none() {
                usage();
            }
            continue;
        }
        match arg.parse::<f32>() {
            Ok(f) => frequencies.push(f),
            Err(_) => usage(),
        }
    }
    if frequencies.is_empty() {
        usage();
    }

    if let Some(rate) = rate {
        audio.engine().with(|e| e.set_tone_multiplexing_rate(rate));
    }
    play_tones(audio, &frequencies, CHORD_LENGTH);
}

fn play_tones(audio: &DesktopAudio, frequencies: &[f32], length: Duration) {
    let active = audio.engine().with(|e| {
        for &f in frequencies {
            e.play_tone(f);
        }
        e.active_tones()
    });
    if active == 0 {
        println!("Audio is off.");
        return;
    }
    thread::sleep(length);
    audio.engine().with(|e| {
        for &f in frequencies {
            e.stop_tone(f);
        }
    });
}
