use retro8080::{Mode, RunConfig};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mode = args.next().unwrap_or_else(|| "arcade".to_string());
    let image_path = args.next().unwrap_or_default();
    let frames = args.next();

    let mode: Mode = match mode.parse() {
        Ok(mode) => mode,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    if image_path.is_empty() {
        eprintln!(
            "No image path provided.\n\
             Usage: retro8080 <arcade|cpm> <image> [frames]\n\
             For example: retro8080 cpm assets/roms/8080_tests/TST8080.COM"
        );
        std::process::exit(1);
    }

    let frames = match frames.map(|s| s.parse::<u32>()) {
        None => 60,
        Some(Ok(frames)) => frames,
        Some(Err(err)) => {
            eprintln!("Invalid frame count: {}", err);
            std::process::exit(1);
        }
    };

    let config = RunConfig::builder().mode(mode).frames(frames).build();

    log::info!("Running '{}' in {:?} mode", image_path, mode);
    let result = retro8080::loader::load_image(&image_path)
        .and_then(|image| retro8080::run(&config, &image));
    if let Err(err) = result {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
