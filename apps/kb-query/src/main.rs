use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = kb_query::Args::parse();

	kb_query::run(args).await
}
