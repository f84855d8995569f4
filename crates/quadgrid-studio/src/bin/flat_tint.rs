fn main() -> anyhow::Result<()> {
    quadgrid_studio::run(quadgrid_studio::presets::flat_tint())
}
