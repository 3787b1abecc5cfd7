use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    reminder_lambda_get::run().await
}
