mod config;
mod error;
mod handlers;
mod models;
mod routes;

#[cfg(test)]
mod tests;

use axum::{body::Body, extract::Request, response::Response, Router};
use http_body_util::BodyExt;
use lambda_http::{
    run, service_fn, Body as LambdaBody, Error, Request as LambdaRequest,
    Response as LambdaResponse,
};
use tower::ServiceExt;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, ServiceConfig};

// The Lambda handler function
async fn function_handler(
    app: Router,
    event: LambdaRequest,
) -> Result<LambdaResponse<LambdaBody>, Error> {
    tracing::info!(
        "Received Lambda request: method={:?}, path={:?}, query_params={:?}",
        event.method(),
        event.uri().path(),
        event.uri().query()
    );

    // Convert the Lambda event to an HTTP request for Axum
    let (parts, body) = event.into_parts();
    let body = match body {
        LambdaBody::Empty => Body::empty(),
        LambdaBody::Text(text) => {
            tracing::debug!("Request body (text): {} bytes", text.len());
            Body::from(text)
        }
        LambdaBody::Binary(data) => {
            tracing::debug!("Request body (binary): {} bytes", data.len());
            Body::from(data)
        }
    };

    let http_request = Request::from_parts(parts, body);

    // Router errors are Infallible
    let response = match app.oneshot(http_request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };

    let lambda_response = response_to_lambda(response).await?;
    tracing::info!(
        "Returning Lambda response: status={}",
        lambda_response.status()
    );

    Ok(lambda_response)
}

// Convert the Axum response to a format suitable for Lambda
async fn response_to_lambda(response: Response) -> Result<LambdaResponse<LambdaBody>, Error> {
    let (parts, body) = response.into_parts();

    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => {
            tracing::error!("Failed to read response body: {:?}", err);
            return Err(Error::from(err));
        }
    };

    let builder = LambdaResponse::builder().status(parts.status);

    let builder_with_headers = parts
        .headers
        .iter()
        .fold(builder, |builder, (name, value)| builder.header(name, value));

    let lambda_response = if bytes.is_empty() {
        builder_with_headers.body(LambdaBody::Empty)?
    } else {
        match String::from_utf8(bytes.to_vec()) {
            Ok(text) => builder_with_headers.body(LambdaBody::Text(text))?,
            Err(err) => builder_with_headers.body(LambdaBody::Binary(err.into_bytes()))?,
        }
    };

    Ok(lambda_response)
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,users_service=debug,users_shared=debug"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false) // Disable ANSI colors in Lambda environment
        .with_target(true);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = ServiceConfig::from_env()?;
    init_tracing(config.log_format);
    tracing::info!(
        "Starting {} {} with config: {:?}",
        config.service_name,
        config.service_version,
        config
    );

    let app = routes::create_router(&config).await;

    if let Ok(function_name) = std::env::var("AWS_LAMBDA_FUNCTION_NAME") {
        tracing::info!(
            "Running in AWS Lambda environment: {} (version: {})",
            function_name,
            std::env::var("AWS_LAMBDA_FUNCTION_VERSION").unwrap_or_else(|_| "unknown".into())
        );
        run(service_fn(move |event| function_handler(app.clone(), event))).await?;
    } else {
        tracing::info!("Starting service in non-Lambda environment");
        let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
        tracing::info!("listening on {}", config.bind_addr);
        axum::serve(listener, app.into_make_service()).await?;
    }

    tracing::info!("Service finished");
    Ok(())
}
