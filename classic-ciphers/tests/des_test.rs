use classic_ciphers::bits::BinaryString;
use classic_ciphers::des::key_schedule::SubKeys;
use classic_ciphers::des::round::SBOX_OUTPUT_BITS;
use classic_ciphers::des::{Des, DesParams};
use classic_ciphers::errors::CipherError;
use classic_ciphers::preset::des_tables::{FP, IP};

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

use std::sync::Once;

static INIT: Once = Once::new();

fn init_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

#[test]
fn happy_flow() -> Result<(), CipherError> {
    init_logging();

    let des = Des::default();
    let ciphertext = des.encryption("haythams", "haytham")?;

    assert_eq!(
        ciphertext,
        "01100001011000100110001101100100011001010110011001100111011010001100110000100110100110101111100111010100100101100001100010101100"
    );
    assert_eq!(des.decryption(&ciphertext, "haytham")?, "haythams");

    Ok(())
}

#[test]
fn browser_vector_with_unpadded_sbox_outputs() -> Result<(), CipherError> {
    init_logging();

    let des = Des::try_with(&DesParams::from_json(r#"{ "sbox_width": 0 }"#)?)?;
    let ciphertext = des.encryption("haythams", "haythams")?;

    assert_eq!(
        ciphertext,
        "01100001011000100110001101100100011001010110011001100111011010000101111000000110001100000110011001111100000001101110101011101010"
    );
    assert_eq!(des.decryption(&ciphertext, "haythams")?, "haythams");

    Ok(())
}

#[test]
fn multi_block_message_with_padding() -> Result<(), CipherError> {
    init_logging();

    let des = Des::default();
    let original = "The quick brown fox jumps over the lazy dog";
    let ciphertext = des.encryption(original, "8bytekey")?;

    // IV + ceil(43 / 8) blocks
    assert_eq!(ciphertext.len(), 64 * 7);
    let decoded = des.decryption(&ciphertext, "8bytekey")?;
    assert_eq!(decoded.trim_end_matches('\0'), original);
    assert_eq!(decoded.len(), 48);

    Ok(())
}

#[test]
fn repeated_blocks_encrypt_differently() -> Result<(), CipherError> {
    let des = Des::default();
    let ciphertext = des.encryption("samesamesamesame", "key")?;
    assert_ne!(ciphertext[64..128], ciphertext[128..192]);
    Ok(())
}

#[test]
fn wrong_key_does_not_decrypt() -> Result<(), CipherError> {
    let des = Des::default();
    let ciphertext = des.encryption("haythams", "haytham")?;
    assert_ne!(des.decryption(&ciphertext, "haythan")?, "haythams");
    Ok(())
}

#[test]
fn custom_iv_from_json() -> Result<(), CipherError> {
    let des = Des::try_with(&DesParams::from_json(r#"{ "iv": "zyxwvuts" }"#)?)?;
    let ciphertext = des.encryption("message", "key")?;

    assert!(ciphertext.starts_with(&BinaryString::from_text("zyxwvuts")?.to_string()));
    assert_eq!(des.decryption(&ciphertext, "key")?, "message\0");
    Ok(())
}

#[test]
fn wide_characters_are_rejected() {
    let des = Des::default();
    assert!(matches!(
        des.encryption("Вітання", "key"),
        Err(CipherError::MalformedInput(_))
    ));
    assert!(matches!(
        des.encryption("hello", "ключ"),
        Err(CipherError::MalformedInput(_))
    ));
}

#[test]
fn initial_permutation_is_inverted_by_final_permutation() -> Result<(), CipherError> {
    for text in ["abcdefgh", "\0\0\0\0\0\0\0\0", "ÿÿÿÿÿÿÿÿ", "01234567"] {
        let block = BinaryString::from_text(text)?;
        assert_eq!(block.permute(&IP)?.permute(&FP)?, block);
    }
    Ok(())
}

#[quickcheck]
fn prop_round_trip_up_to_zero_padding(plaintext: Vec<u8>, key: Vec<u8>) -> TestResult {
    let des = Des::default();
    let plaintext = latin1(&plaintext);
    let key = latin1(&key);

    let decoded = match des
        .encryption(&plaintext, &key)
        .and_then(|ciphertext| des.decryption(&ciphertext, &key))
    {
        Ok(decoded) => decoded,
        Err(e) => return TestResult::error(e.to_string()),
    };

    let padding = (8 - plaintext.chars().count() % 8) % 8;
    let expected = format!("{}{}", plaintext, "\0".repeat(padding));
    TestResult::from_bool(decoded == expected)
}

#[quickcheck]
fn prop_key_schedule_is_deterministic(key: Vec<u8>) -> bool {
    let key = latin1(&key);
    match (Des::sub_keys(&key), Des::sub_keys(&key)) {
        (Ok(first), Ok(second)) => first == second && first.len() == 16,
        _ => false,
    }
}

#[quickcheck]
fn prop_reversed_keys_undo_the_block_function(block: u64, key: u64) -> bool {
    let to_bits = |value: u64| {
        BinaryString::from_value((value >> 32) as u32, 32)
            .concat(&BinaryString::from_value(value as u32, 32))
    };

    let keys = match SubKeys::derive(&to_bits(key)) {
        Ok(keys) => keys,
        Err(_) => return false,
    };
    let plain = to_bits(block);

    classic_ciphers::des::block::feistel(&plain, &keys, SBOX_OUTPUT_BITS)
        .and_then(|cipher| {
            classic_ciphers::des::block::feistel(&cipher, &keys.reversed(), SBOX_OUTPUT_BITS)
        })
        .map(|decoded| decoded == plain)
        .unwrap_or(false)
}
