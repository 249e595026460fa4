//! Basic example demonstrating simple GET and POST requests.
//!
//! This example shows how to:
//! - Create a client bound to a host
//! - Make GET requests with query parameters
//! - Make POST requests with a JSON body
//! - Decode response bodies and inspect status metadata
//!
//! Run with: `cargo run --example basic_call`

use hostbound::{Client, Request};
use serde::Deserialize;
use serde_json::{json, Map};

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Comment {
    #[serde(rename = "postId")]
    post_id: u32,
    id: u32,
    name: String,
    email: String,
}

#[derive(Debug, Deserialize)]
struct Post {
    id: u32,
    title: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("hostbound=debug,basic_call=info")
        .init();

    // Create a client for the JSONPlaceholder API
    let client = Client::builder("jsonplaceholder.typicode.com").build()?;

    println!("=== GET Request Example ===");
    // Fetch the comments attached to post 1
    let request = Request::get("/comments").with_query_param("postId", "1");
    let response = client.send(&request).await?;

    let comments: Vec<Comment> = response.json()?;
    println!("Status code: {}", response.status);
    println!("Fetched {} comments", comments.len());
    if let Some(first) = comments.first() {
        println!("First comment: {} <{}>", first.name, first.email);
    }
    println!();

    println!("=== POST Request Example ===");
    // Create a new post from a JSON body map
    let mut body = Map::new();
    body.insert("title".to_string(), json!("My New Post"));
    body.insert(
        "body".to_string(),
        json!("This is the content of my new post!"),
    );
    body.insert("userId".to_string(), json!(1));

    let response = client
        .send(&Request::post("/posts").with_body(body))
        .await?;

    let created: Post = response.json()?;
    println!("Created post ID: {}", created.id);
    println!("Title: {}", created.title);
    println!();

    println!("=== Inspecting the Raw Response ===");
    println!("Success: {}", response.success);
    println!("Status code: {}", response.status);
    println!("Raw body length: {} bytes", response.data.len());

    Ok(())
}
