use quadgrid_studio::presets;

fn main() -> anyhow::Result<()> {
    let images = presets::images_from_args(std::env::args().skip(1));
    quadgrid_studio::run(presets::oscillate(images))
}
