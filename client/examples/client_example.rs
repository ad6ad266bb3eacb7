use minesweeper_client::{Credentials, DEV_API_URL, GameConfig, MinesweeperClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    println!("Starting the game...");

    let client = MinesweeperClient::new(DEV_API_URL, Credentials::new("cspinetta", "123456789"))?;

    let game = client
        .create_game(GameConfig {
            height: 10,
            width: 10,
            mines: 10,
        })
        .await?;
    println!("{game}");

    Ok(())
}
