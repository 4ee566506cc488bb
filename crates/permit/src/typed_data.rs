//! EIP-712 encoding of permit requests.
//!
//! `digest = keccak256(0x19 0x01 || domainSeparator || hashStruct(message))`
//!
//! The struct definitions come from `binding::permit`; their field order is the
//! on-chain `PERMIT_TYPEHASH` and must not be reordered.

use crate::request::{PermitKind, PermitRequest};
use alloy_primitives::{keccak256, B256, U256};
use alloy_sol_types::{Eip712Domain, SolStruct};
use binding::permit::{dai, eip2612};
use serde::Serialize;
use serde_json::{json, Value};
use std::borrow::Cow;

/// Everything a signer may need: the digest for raw-hash signers and the
/// typed-data document for `eth_signTypedData_v4` style signers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningPayload {
    pub domain_separator: B256,
    pub struct_hash: B256,
    pub digest: B256,
    pub typed_data: Value,
}

impl SigningPayload {
    /// Encode a request. Assumes the request has been validated.
    pub fn new(request: &PermitRequest) -> Self {
        let domain = permit_domain(request);
        let domain_separator = domain.separator();
        let struct_hash = match request.kind {
            PermitKind::Dai => dai_message(request).eip712_hash_struct(),
            PermitKind::Eip2612 | PermitKind::Uni => eip2612_message(request).eip712_hash_struct(),
        };

        Self {
            domain_separator,
            struct_hash,
            digest: signing_digest(domain_separator, struct_hash),
            typed_data: typed_data_document(request),
        }
    }
}

/// EIP-712 domain the token contract recomputes on `permit`.
pub fn permit_domain(request: &PermitRequest) -> Eip712Domain {
    let version = request
        .kind
        .has_version()
        .then(|| Cow::Owned(request.token_version.clone()));

    Eip712Domain::new(
        Some(Cow::Owned(request.token_name.clone())),
        version,
        Some(U256::from(request.chain_id)),
        Some(request.token_address),
        None,
    )
}

/// Combine a domain separator and struct hash into the signed digest.
pub fn signing_digest(domain_separator: B256, struct_hash: B256) -> B256 {
    let mut buf = [0u8; 66];
    buf[0] = 0x19;
    buf[1] = 0x01;
    buf[2..34].copy_from_slice(domain_separator.as_slice());
    buf[34..].copy_from_slice(struct_hash.as_slice());
    keccak256(buf)
}

pub(crate) fn eip2612_message(request: &PermitRequest) -> eip2612::Permit {
    eip2612::Permit {
        owner: request.owner,
        spender: request.spender,
        value: request.value,
        nonce: request.nonce,
        deadline: request.deadline,
    }
}

pub(crate) fn dai_message(request: &PermitRequest) -> dai::Permit {
    dai::Permit {
        holder: request.owner,
        spender: request.spender,
        nonce: request.nonce,
        expiry: request.deadline,
        allowed: request.value == U256::MAX,
    }
}

/// JSON document accepted by `eth_signTypedData_v4`.
fn typed_data_document(request: &PermitRequest) -> Value {
    let mut domain_fields = vec![json!({ "name": "name", "type": "string" })];
    let mut domain = json!({
        "name": request.token_name,
        "chainId": request.chain_id,
        "verifyingContract": request.token_address.to_string(),
    });
    if request.kind.has_version() {
        domain_fields.push(json!({ "name": "version", "type": "string" }));
        domain["version"] = json!(request.token_version);
    }
    domain_fields.push(json!({ "name": "chainId", "type": "uint256" }));
    domain_fields.push(json!({ "name": "verifyingContract", "type": "address" }));

    let (permit_fields, message) = match request.kind {
        PermitKind::Dai => (
            json!([
                { "name": "holder", "type": "address" },
                { "name": "spender", "type": "address" },
                { "name": "nonce", "type": "uint256" },
                { "name": "expiry", "type": "uint256" },
                { "name": "allowed", "type": "bool" },
            ]),
            json!({
                "holder": request.owner.to_string(),
                "spender": request.spender.to_string(),
                "nonce": request.nonce.to_string(),
                "expiry": request.deadline.to_string(),
                "allowed": request.value == U256::MAX,
            }),
        ),
        PermitKind::Eip2612 | PermitKind::Uni => (
            json!([
                { "name": "owner", "type": "address" },
                { "name": "spender", "type": "address" },
                { "name": "value", "type": "uint256" },
                { "name": "nonce", "type": "uint256" },
                { "name": "deadline", "type": "uint256" },
            ]),
            json!({
                "owner": request.owner.to_string(),
                "spender": request.spender.to_string(),
                "value": request.value.to_string(),
                "nonce": request.nonce.to_string(),
                "deadline": request.deadline.to_string(),
            }),
        ),
    };

    json!({
        "types": {
            "EIP712Domain": domain_fields,
            "Permit": permit_fields,
        },
        "primaryType": "Permit",
        "domain": domain,
        "message": message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::test_utils::wrapped_token_request;
    use alloy_primitives::{address, b256, Address};
    use alloy_sol_types::SolValue;

    const OWNER: Address = address!("0x1111111111111111111111111111111111111111");

    const DOMAIN_TYPE: &str =
        "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";
    const PERMIT_TYPE: &str =
        "Permit(address owner,address spender,uint256 value,uint256 nonce,uint256 deadline)";

    /// Hash the domain by hand, the way the token's constructor does.
    fn manual_domain_separator(request: &PermitRequest) -> B256 {
        let encoded = (
            keccak256(DOMAIN_TYPE.as_bytes()),
            keccak256(request.token_name.as_bytes()),
            keccak256(request.token_version.as_bytes()),
            U256::from(request.chain_id),
            request.token_address,
        )
            .abi_encode_sequence();
        keccak256(encoded)
    }

    fn manual_struct_hash(type_string: &str, request: &PermitRequest) -> B256 {
        let encoded = (
            keccak256(type_string.as_bytes()),
            request.owner,
            request.spender,
            request.value,
            request.nonce,
            request.deadline,
        )
            .abi_encode_sequence();
        keccak256(encoded)
    }

    #[test]
    fn test_domain_type_hash() {
        assert_eq!(
            keccak256(DOMAIN_TYPE.as_bytes()),
            b256!("8b73c3c69bb8fe3d512ecc4cf759cc79239f7b179b0ffacaa9a75d522b39400f")
        );
    }

    #[test]
    fn test_payload_matches_manual_encoding() {
        let request = wrapped_token_request(OWNER);
        let payload = SigningPayload::new(&request);

        let domain_separator = manual_domain_separator(&request);
        let struct_hash = manual_struct_hash(PERMIT_TYPE, &request);

        assert_eq!(payload.domain_separator, domain_separator);
        assert_eq!(payload.struct_hash, struct_hash);
        assert_eq!(
            payload.digest,
            signing_digest(domain_separator, struct_hash)
        );
        assert_eq!(
            payload.digest,
            eip2612_message(&request).eip712_signing_hash(&permit_domain(&request))
        );
    }

    #[test]
    fn test_field_order_changes_digest() {
        let request = wrapped_token_request(OWNER);
        let payload = SigningPayload::new(&request);

        let permuted_type =
            "Permit(address spender,address owner,uint256 value,uint256 nonce,uint256 deadline)";
        let encoded = (
            keccak256(permuted_type.as_bytes()),
            request.spender,
            request.owner,
            request.value,
            request.nonce,
            request.deadline,
        )
            .abi_encode_sequence();
        let permuted = signing_digest(payload.domain_separator, keccak256(encoded));

        assert_ne!(permuted, payload.digest);
    }

    #[test]
    fn test_domain_separation() {
        let request = wrapped_token_request(OWNER);
        let base = SigningPayload::new(&request);

        let mut other_chain = request.clone();
        other_chain.chain_id = 1;
        let mut other_token = request.clone();
        other_token.token_address = address!("0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");

        let chain_payload = SigningPayload::new(&other_chain);
        let token_payload = SigningPayload::new(&other_token);

        assert_eq!(base.struct_hash, chain_payload.struct_hash);
        assert_ne!(base.digest, chain_payload.digest);
        assert_ne!(base.digest, token_payload.digest);
        assert_ne!(chain_payload.digest, token_payload.digest);
    }

    #[test]
    fn test_uni_domain_omits_version() {
        let mut request = wrapped_token_request(OWNER);
        request.kind = PermitKind::Uni;
        let payload = SigningPayload::new(&request);

        let encoded = (
            keccak256(
                "EIP712Domain(string name,uint256 chainId,address verifyingContract)".as_bytes(),
            ),
            keccak256(request.token_name.as_bytes()),
            U256::from(request.chain_id),
            request.token_address,
        )
            .abi_encode_sequence();

        assert_eq!(payload.domain_separator, keccak256(encoded));
        assert!(payload.typed_data["domain"].get("version").is_none());
        assert_eq!(
            payload.typed_data["types"]["EIP712Domain"]
                .as_array()
                .map(Vec::len),
            Some(3)
        );
    }

    #[test]
    fn test_dai_message_uses_allowed_flag() {
        let mut request = wrapped_token_request(OWNER);
        request.kind = PermitKind::Dai;
        request.value = U256::MAX;

        let message = dai_message(&request);
        assert!(message.allowed);
        assert_eq!(message.expiry, request.deadline);

        let payload = SigningPayload::new(&request);
        assert_eq!(payload.typed_data["message"]["allowed"], json!(true));
        assert_eq!(
            payload.typed_data["message"]["holder"],
            json!(OWNER.to_string())
        );
    }

    #[test]
    fn test_typed_data_document() {
        let request = wrapped_token_request(OWNER);
        let payload = SigningPayload::new(&request);
        let doc = &payload.typed_data;

        assert_eq!(doc["primaryType"], "Permit");
        assert_eq!(doc["domain"]["chainId"], json!(1101));
        assert_eq!(doc["domain"]["version"], "1");
        assert_eq!(doc["message"]["value"], "1000000000000000000");
        assert_eq!(doc["message"]["deadline"], "9999999999");

        let names: Vec<&str> = doc["types"]["Permit"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|field| field["name"].as_str())
            .collect();
        assert_eq!(names, ["owner", "spender", "value", "nonce", "deadline"]);
    }
}
