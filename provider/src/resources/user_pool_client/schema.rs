use strum::VariantNames;
use stratus_common::{
    caps,
    types::{
        ValidationError,
        arn::Arn,
        user_pool::{
            ClientName, ExplicitAuthFlowsType, OAuthFlowType, PreventUserExistenceErrorTypes,
            TimeUnitsType, UserPoolId, validate_identity_provider_name, validate_url,
        },
    },
};

use crate::schema::{AttributeSchema, AttributeType, ResourceSchema, Validator};

fn user_pool_id(value: &str) -> Result<(), ValidationError> {
    value.parse::<UserPoolId>().map(drop)
}

fn client_name(value: &str) -> Result<(), ValidationError> {
    value.parse::<ClientName>().map(drop)
}

fn arn(value: &str) -> Result<(), ValidationError> {
    value.parse::<Arn>().map(drop)
}

fn optional_computed_int(name: &'static str, range: std::ops::RangeInclusive<i64>) -> AttributeSchema {
    AttributeSchema::new(name, AttributeType::Int)
        .optional_computed()
        .validate(Validator::int_between(range))
}

fn optional_computed_set(name: &'static str) -> AttributeSchema {
    AttributeSchema::new(name, AttributeType::string_set()).optional_computed()
}

fn optional_computed_bool(name: &'static str) -> AttributeSchema {
    AttributeSchema::new(name, AttributeType::Bool).optional_computed()
}

fn time_units(name: &'static str, default: TimeUnitsType) -> AttributeSchema {
    AttributeSchema::new(name, AttributeType::String)
        .optional_computed()
        .with_default(default.to_string())
        .validate(Validator::one_of(TimeUnitsType::VARIANTS))
}

pub fn user_pool_client_schema(type_name: &'static str) -> ResourceSchema {
    ResourceSchema::new(type_name)
        .with_description("An app client of an Amazon Cognito user pool.")
        .attribute(
            AttributeSchema::new("id", AttributeType::String)
                .computed()
                .use_state_for_unknown()
                .with_description("Client ID assigned by Cognito."),
        )
        .attribute(
            AttributeSchema::new("user_pool_id", AttributeType::String)
                .required()
                .force_new()
                .validate(Validator::length_between(1, caps::MAX_USER_POOL_ID_LEN))
                .validate(Validator::check("user pool id", user_pool_id)),
        )
        .attribute(
            AttributeSchema::new("name", AttributeType::String)
                .required()
                .validate(Validator::length_between(1, caps::MAX_CLIENT_NAME_LEN))
                .validate(Validator::check("client name", client_name)),
        )
        .attribute(optional_computed_int(
            "access_token_validity",
            caps::ACCESS_TOKEN_VALIDITY,
        ))
        .attribute(optional_computed_int("id_token_validity", caps::ID_TOKEN_VALIDITY))
        .attribute(optional_computed_int(
            "refresh_token_validity",
            caps::REFRESH_TOKEN_VALIDITY,
        ))
        .attribute(
            optional_computed_int("auth_session_validity", caps::AUTH_SESSION_VALIDITY)
                .with_description("Minutes a session token for each API request is valid."),
        )
        .attribute(
            optional_computed_set("allowed_oauth_flows")
                .validate(Validator::SizeAtMost {
                    max: caps::MAX_ALLOWED_OAUTH_FLOWS,
                })
                .validate(Validator::one_of(OAuthFlowType::VARIANTS)),
        )
        .attribute(optional_computed_bool("allowed_oauth_flows_user_pool_client"))
        .attribute(optional_computed_set("allowed_oauth_scopes").validate(
            Validator::SizeAtMost {
                max: caps::MAX_ALLOWED_OAUTH_SCOPES,
            },
        ))
        .attribute(
            optional_computed_set("callback_urls")
                .validate(Validator::SizeAtMost {
                    max: caps::MAX_CALLBACK_URLS,
                })
                .validate(Validator::check("url", validate_url)),
        )
        .attribute(
            optional_computed_set("logout_urls")
                .validate(Validator::SizeAtMost {
                    max: caps::MAX_LOGOUT_URLS,
                })
                .validate(Validator::check("url", validate_url)),
        )
        .attribute(
            AttributeSchema::new("default_redirect_uri", AttributeType::String)
                .optional_computed()
                .validate(Validator::check("url", validate_url)),
        )
        .attribute(
            AttributeSchema::new("client_secret", AttributeType::String)
                .computed()
                .sensitive()
                .use_state_for_unknown(),
        )
        .attribute(optional_computed_bool(
            "enable_propagate_additional_user_context_data",
        ))
        .attribute(optional_computed_bool("enable_token_revocation"))
        .attribute(
            optional_computed_set("explicit_auth_flows")
                .validate(Validator::one_of(ExplicitAuthFlowsType::VARIANTS)),
        )
        .attribute(
            AttributeSchema::new("generate_secret", AttributeType::Bool)
                .optional()
                .force_new(),
        )
        .attribute(
            AttributeSchema::new("prevent_user_existence_errors", AttributeType::String)
                .optional_computed()
                .validate(Validator::one_of(PreventUserExistenceErrorTypes::VARIANTS)),
        )
        .attribute(optional_computed_set("read_attributes"))
        .attribute(optional_computed_set("write_attributes"))
        .attribute(
            optional_computed_set("supported_identity_providers").validate(Validator::check(
                "identity provider name",
                validate_identity_provider_name,
            )),
        )
        .attribute(
            AttributeSchema::new(
                "analytics_configuration",
                AttributeType::block([
                    AttributeSchema::new("application_arn", AttributeType::String)
                        .optional()
                        .validate(Validator::check("arn", arn))
                        .validate(Validator::ExactlyOneOf {
                            attributes: &["application_id", "application_arn"],
                        })
                        .validate(Validator::ConflictsWith {
                            attributes: &["external_id", "role_arn"],
                        }),
                    AttributeSchema::new("application_id", AttributeType::String)
                        .optional()
                        .validate(Validator::AlsoRequires {
                            attributes: &["external_id", "role_arn"],
                        }),
                    AttributeSchema::new("external_id", AttributeType::String).optional(),
                    AttributeSchema::new("role_arn", AttributeType::String)
                        .optional_computed()
                        .validate(Validator::check("arn", arn)),
                    AttributeSchema::new("user_data_shared", AttributeType::Bool)
                        .optional_computed(),
                ]),
            )
            .optional()
            .with_description("Amazon Pinpoint analytics for the client. At most one block."),
        )
        .attribute(
            AttributeSchema::new(
                "token_validity_units",
                AttributeType::block([
                    time_units("access_token", TimeUnitsType::Hours),
                    time_units("id_token", TimeUnitsType::Hours),
                    time_units("refresh_token", TimeUnitsType::Days),
                ]),
            )
            .optional()
            .with_description("Units for the token validity attributes. At most one block."),
        )
}
