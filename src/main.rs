use fractile::app::App;
use fractile::engine::colormap::ColorMap;
use fractile::engine::config::Config;
use fractile::fractal::Mandelbrot;
use fractile::ui::TuiManager;
use log::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::from_env();
    let colormap = match std::env::var("FRACTILE_PALETTE") {
        Ok(path) => ColorMap::from_image(&path)?,
        Err(_) => ColorMap::grayscale(),
    };
    let field = Mandelbrot::new(&config.fractal);

    let mut tui = TuiManager::new(&config)?;
    let (width, height) = tui.surface_size();
    info!("surface is {width}x{height} pixels");

    let mut app = App::new(&config, width, height, Box::new(field), colormap)?;
    tui.run_event_loop(&mut app)?;

    Ok(())
}
