use anyhow::Context;
use quill_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load Quill settings")?;
    quill_telemetry::init(&settings.telemetry).with_context(|| "failed to initialize telemetry")?;

    quill_app::serve(settings).await
}
