//! AWS Lambda function exercising the fnlog logging identity shim.

use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    fnlog_lambda::run().await
}
