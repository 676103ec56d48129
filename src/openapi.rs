//! OpenAPI 3.1 description of the `/v1` surface, served at `/openapi.json`.

use crate::error::ErrorBody;
use crate::model::{
    Country, CountryPatch, Customer, CustomerPatch, Entity, Installation, InstallationPatch, Product,
    ProductCategory, ProductCategoryPatch, ProductPatch,
};
use utoipa::openapi::path::{HttpMethod, Operation, OperationBuilder, ParameterBuilder, ParameterIn};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::content::{Content, ContentBuilder};
use utoipa::openapi::response::{Response, ResponseBuilder};
use utoipa::openapi::schema::{ArrayBuilder, ObjectBuilder, Ref, Schema, Type};
use utoipa::openapi::{RefOr, Required};
use utoipa::{OpenApi, ToSchema};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "installbase-api",
        description = "CRUD for countries, customers, products, product categories and installations."
    ),
    components(schemas(
        Country,
        CountryPatch,
        Customer,
        CustomerPatch,
        Product,
        ProductPatch,
        ProductCategory,
        ProductCategoryPatch,
        Installation,
        InstallationPatch,
        ErrorBody
    ))
)]
struct ApiDoc;

/// The full document: derived components plus the per-entity paths.
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    add_entity_paths::<Country>(&mut doc);
    add_entity_paths::<Customer>(&mut doc);
    add_entity_paths::<ProductCategory>(&mut doc);
    add_entity_paths::<Product>(&mut doc);
    add_entity_paths::<Installation>(&mut doc);
    doc
}

fn schema_ref(name: &str) -> RefOr<Schema> {
    RefOr::Ref(Ref::from_schema_name(name))
}

fn json(schema: RefOr<Schema>) -> Content {
    ContentBuilder::new().schema(Some(schema)).build()
}

fn response(description: &str, body: Option<RefOr<Schema>>) -> RefOr<Response> {
    let mut builder = ResponseBuilder::new().description(description);
    if let Some(schema) = body {
        builder = builder.content("application/json", json(schema));
    }
    RefOr::T(builder.build())
}

fn error(description: &str) -> RefOr<Response> {
    response(description, Some(schema_ref("ErrorBody")))
}

fn operation(tag: &str, id: String, summary: String) -> OperationBuilder {
    OperationBuilder::new()
        .tag(tag)
        .operation_id(Some(id))
        .summary(Some(summary))
}

fn with_id_param(op: OperationBuilder) -> OperationBuilder {
    let integer = ObjectBuilder::new().schema_type(Type::Integer).build();
    op.parameter(
        ParameterBuilder::new()
            .name("id")
            .parameter_in(ParameterIn::Path)
            .required(Required::True)
            .schema(Some(RefOr::T(Schema::Object(integer))))
            .build(),
    )
}

fn with_body(op: OperationBuilder, schema_name: &str) -> OperationBuilder {
    op.request_body(Some(
        RequestBodyBuilder::new()
            .content("application/json", json(schema_ref(schema_name)))
            .required(Some(Required::True))
            .build(),
    ))
}

fn add_entity_paths<E>(doc: &mut utoipa::openapi::OpenApi)
where
    E: Entity + ToSchema,
    E::Patch: ToSchema,
{
    let def = E::TABLE;
    let record = E::name();
    let patch = <E::Patch as ToSchema>::name();
    let tag = def.path_segment;
    let table = def.table;
    let collection = format!("/v1/{}", def.path_segment);
    let item = format!("/v1/{}/{{id}}", def.path_segment);
    let not_found = def.not_found_message();
    let invalid = "Malformed or mistyped input";

    let list: Operation = operation(tag, format!("list_{}", table), format!("List every {}", def.entity_name))
        .response(
            "200",
            response(
                "All records",
                Some(RefOr::T(Schema::Array(ArrayBuilder::new().items(schema_ref(&record)).build()))),
            ),
        )
        .build();
    let create: Operation = with_body(
        operation(tag, format!("create_{}", table), format!("Create a {}", def.entity_name)),
        &record,
    )
    .response("201", response("Created", Some(schema_ref(&record))))
    .response("409", error(&format!("{} with this id already exists", def.entity_name)))
    .response("422", error(invalid))
    .build();
    let read: Operation = with_id_param(operation(tag, format!("read_{}", table), format!("Get a {}", def.entity_name)))
        .response("200", response("Found", Some(schema_ref(&record))))
        .response("404", error(&not_found))
        .response("422", error(invalid))
        .build();
    let replace: Operation = with_body(
        with_id_param(operation(tag, format!("replace_{}", table), format!("Replace a {}", def.entity_name))),
        &record,
    )
    .response("200", response("Updated", Some(schema_ref(&record))))
    .response("404", error(&not_found))
    .response("422", error(invalid))
    .build();
    let merge: Operation = with_body(
        with_id_param(operation(
            tag,
            format!("merge_{}", table),
            format!("Partially update a {}", def.entity_name),
        )),
        &patch,
    )
    .response("200", response("Updated", Some(schema_ref(&record))))
    .response("404", error(&not_found))
    .response("422", error(invalid))
    .build();
    let delete: Operation = with_id_param(operation(tag, format!("delete_{}", table), format!("Delete a {}", def.entity_name)))
        .response("204", response("Deleted", None))
        .response("404", error(&not_found))
        .response("422", error(invalid))
        .build();

    let paths = &mut doc.paths;
    paths.add_path_operation(&collection, vec![HttpMethod::Get], list);
    paths.add_path_operation(&collection, vec![HttpMethod::Post], create);
    paths.add_path_operation(&item, vec![HttpMethod::Get], read);
    paths.add_path_operation(&item, vec![HttpMethod::Put], replace);
    paths.add_path_operation(&item, vec![HttpMethod::Patch], merge);
    paths.add_path_operation(&item, vec![HttpMethod::Delete], delete);
}
