//! OpenAPI documentation for the signup service.
//!
//! [`ApiDoc`] registers the registration endpoint, the health probes and the
//! request and response schemas. Swagger UI serves it in debug builds.

use utoipa::OpenApi;

use crate::domain::RegistrationRequest;
use crate::inbound::http::RegistrationResponse;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Signup API",
        description = "Account registration backed by a managed identity provider."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::register::register,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(RegistrationRequest, RegistrationResponse)),
    tags(
        (name = "registration", description = "Account signup"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Shape checks for the generated document.

    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_fields(schema: &RefOr<Schema>, fields: &[&str]) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                for field in fields {
                    assert!(
                        obj.properties.contains_key(*field),
                        "schema should have field '{field}'"
                    );
                }
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn registers_the_registration_and_probe_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/api/v1/register", "/health/ready", "/health/live"] {
            assert!(doc.paths.paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn request_schema_uses_camel_case_keys() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let request = schemas
            .get("RegistrationRequest")
            .expect("RegistrationRequest schema");
        assert_object_schema_has_fields(
            request,
            &["username", "email", "password", "fullName", "phoneNumber"],
        );
    }

    #[test]
    fn response_schema_is_the_message_envelope() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let response = schemas
            .get("RegistrationResponse")
            .expect("RegistrationResponse schema");
        assert_object_schema_has_fields(response, &["message", "success"]);
    }
}
