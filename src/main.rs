#[actix_web::main]
async fn main() -> std::io::Result<()> {
    qa_scribe_lib::run().await
}
