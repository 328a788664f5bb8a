//! 密码哈希功能单元测试
//!
//! 测试 Argon2id 密码哈希和验证功能

use fitai_service::auth::password::PasswordHasher;

#[test]
fn test_password_hash_and_verify() {
    let hasher = PasswordHasher::new();
    let password = "testpassword123";

    let hash = hasher.hash(password).expect("Hashing should succeed");

    // 哈希值应该包含 argon2 标识
    assert!(hash.contains("$argon2"));

    // 验证正确密码
    hasher.verify(password, &hash).expect("Verification should succeed");
}

#[test]
fn test_password_verify_with_wrong_password() {
    let hasher = PasswordHasher::new();
    let password = "testpassword123";

    let hash = hasher.hash(password).expect("Hashing should succeed");

    // 验证错误密码应该失败
    let result = hasher.verify("wrongpassword456", &hash);
    assert!(result.is_err(), "Wrong password should fail verification");
}

#[test]
fn test_password_hash_different_each_time() {
    let hasher = PasswordHasher::new();
    let password = "testpassword123";

    let hash1 = hasher.hash(password).expect("First hash should succeed");
    let hash2 = hasher.hash(password).expect("Second hash should succeed");

    // 由于随机盐，每次生成的哈希应该不同
    assert_ne!(hash1, hash2, "Hashes should be different due to salt");

    // 但两个哈希都应验证通过
    hasher.verify(password, &hash1).expect("hash1 should verify");
    hasher.verify(password, &hash2).expect("hash2 should verify");
}

#[test]
fn test_verify_with_invalid_hash_format() {
    let hasher = PasswordHasher::new();
    assert!(hasher.verify("anything", "not-a-phc-string").is_err());
}
