/// Sanitize a submitted signup form, field by field and through a derived struct
use field_sanitizer::{FieldSanitizer, FormBody, FromFieldSource};

#[derive(FromFieldSource)]
struct Signup {
    #[field(rule = "email")]
    email: Option<String>,
    #[field(rule = "checkbox")]
    agree: bool,
    #[field(rule = "radio", allowed("silver", "gold", "bronze"))]
    plan: Option<String>,
}

fn main() {
    // suppose this body was received by a web framework as application/x-www-form-urlencoded
    let body = FormBody::parse(b"email=+Ann%40Example.com+&agree=1&plan=platinum&age=abc123");

    let sanitizer = FieldSanitizer::new(&body);
    println!("age: {:?}", sanitizer.sanitize("age", "number", &[]));
    println!("missing: {:?}", sanitizer.sanitize("missing", "text", &[]));

    let signup = Signup::from_field_source(&body);
    println!("email: {:?}", signup.email);
    println!("agree: {}", signup.agree);
    println!("plan: {:?}", signup.plan);
}
