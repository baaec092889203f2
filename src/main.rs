use restaurant_api::infra::config;
use restaurant_api::Server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let host = config::host();
    let port = config::port();

    println!("> Starting restaurant API server...");
    let server = Server::start(&host, port).await?;
    println!("> API server listening on http://{}", server.local_addr());
    println!("> Swagger UI available at http://{}/swagger-ui", server.local_addr());
    println!("> Press Ctrl+C to shut down");

    tokio::signal::ctrl_c().await?;
    println!("\n> Shutdown signal received (Ctrl+C)...");
    server.stop().await?;
    println!("> Graceful shutdown complete.");

    Ok(())
}
