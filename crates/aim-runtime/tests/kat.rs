use aim_field::AimError;
use aim_runtime::{evaluate, evaluate_auto, parse_rsp, KatRecord, Variant};

// (pk = iv || ct, sk = pt) from the count = 0 entries of each parameter set.
const VECTORS: [(&str, &str); 3] = [
    (
        "7C9935A0B07694AA0C6D10E4DB6B1ADD\
         CFCB2D8FA8739AA839CFC249DFBC9E07",
        "91282214654CB55E7C2CACD53919604D",
    ),
    (
        "7C9935A0B07694AA0C6D10E4DB6B1ADD2FD81A25CCB14803\
         78B4FA6C29E81B3828090ABCB4BE64365D4782C0333AE2CF",
        "8626ED79D451140800E03B59B956F8210E556067407D13DC",
    ),
    (
        "7C9935A0B07694AA0C6D10E4DB6B1ADD2FD81A25CCB148032DCD739936737F2D\
         8C15C43B615082DB6D7DC6F8639420321B27976067A21A515B182F976D7E728F",
        "8626ED79D451140800E03B59B956F8210E556067407D13DC90FA9E8B872BFB8F",
    ),
];

fn unhex(s: &str) -> Vec<u8> {
    hex::decode(s).expect("valid hex")
}

#[test]
fn aim128_known_answer() {
    let ct = evaluate(
        Variant::Aim128,
        &unhex("91282214654CB55E7C2CACD53919604D"),
        &unhex("7C9935A0B07694AA0C6D10E4DB6B1ADD"),
    )
    .unwrap();
    assert_eq!(ct, unhex("CFCB2D8FA8739AA839CFC249DFBC9E07"));
}

#[test]
fn aim192_known_answer() {
    let ct = evaluate(
        Variant::Aim192,
        &unhex("8626ED79D451140800E03B59B956F8210E556067407D13DC"),
        &unhex("7C9935A0B07694AA0C6D10E4DB6B1ADD2FD81A25CCB14803"),
    )
    .unwrap();
    assert_eq!(
        ct,
        unhex("78B4FA6C29E81B3828090ABCB4BE64365D4782C0333AE2CF")
    );
}

#[test]
fn aim256_known_answer() {
    let ct = evaluate_auto(
        &unhex("8626ED79D451140800E03B59B956F8210E556067407D13DC90FA9E8B872BFB8F"),
        &unhex("7C9935A0B07694AA0C6D10E4DB6B1ADD2FD81A25CCB148032DCD739936737F2D"),
    )
    .unwrap();
    assert_eq!(
        ct,
        unhex("8C15C43B615082DB6D7DC6F8639420321B27976067A21A515B182F976D7E728F")
    );
}

#[test]
fn key_pairs_verify() {
    for (pk, sk) in VECTORS {
        let record = KatRecord::from_hex(pk, sk).unwrap();
        assert!(record.verify().unwrap(), "{} failed", record.variant);
    }
}

#[test]
fn tagged_key_pairs_verify() {
    for (tag, (pk, sk)) in [(0x01u8, VECTORS[0]), (0x03, VECTORS[1]), (0x05, VECTORS[2])] {
        let pk = format!("{tag:02X}{pk}");
        let sk = format!("{tag:02X}{sk}{}", &pk[2..]);
        let record = KatRecord::from_hex(&pk, &sk).unwrap();
        assert!(record.verify().unwrap());
    }
}

#[test]
fn corrupted_output_is_rejected() {
    let (pk, sk) = VECTORS[1];
    let mut record = KatRecord::from_hex(pk, sk).unwrap();
    record.ct[0] ^= 1;
    assert!(!record.verify().unwrap());
}

#[test]
fn response_file_verifies() {
    let mut text = String::from("# AIMer known answers\n\n");
    for (count, (pk, sk)) in VECTORS.iter().enumerate() {
        text.push_str(&format!("count = {count}\nseed = 00\npk = {pk}\nsk = {sk}{pk}\n\n"));
    }
    let records = parse_rsp(&text).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(
        records.iter().map(|r| r.variant).collect::<Vec<_>>(),
        Variant::ALL.to_vec()
    );
    for record in records {
        assert!(record.verify().unwrap());
    }
}

#[test]
fn unsupported_widths_are_invalid_input() {
    for len in [0usize, 15, 17, 31, 48] {
        let err = evaluate_auto(&vec![0u8; len], &vec![0u8; len]).unwrap_err();
        assert!(matches!(err, AimError::InvalidInput(_)), "len {len}");
    }
    let err = evaluate(Variant::Aim256, &[0u8; 32], &[0u8; 31]).unwrap_err();
    assert!(matches!(err, AimError::InvalidInput(_)));
}
