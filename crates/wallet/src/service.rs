//! In-memory wallet service.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use common::Owner;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::WalletError;

/// Lifecycle state of a coupon held in a wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponStatus {
    Active,
}

/// A coupon code held by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletCoupon {
    pub code: String,
    pub status: CouponStatus,
    pub expires_at: NaiveDate,
}

impl WalletCoupon {
    /// An active coupon expiring on `expires_at`.
    pub fn active(code: impl Into<String>, expires_at: NaiveDate) -> Self {
        Self {
            code: code.into(),
            status: CouponStatus::Active,
            expires_at,
        }
    }
}

/// Process-wide wallets keyed by owner.
#[derive(Debug, Clone)]
pub struct WalletService {
    wallets: Arc<RwLock<HashMap<Owner, Vec<WalletCoupon>>>>,
    default_expiry: NaiveDate,
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("literal calendar date")
}

impl WalletService {
    /// Creates an empty wallet service. Coupons added through [`add`]
    /// expire on `default_expiry`.
    ///
    /// [`add`]: WalletService::add
    pub fn new(default_expiry: NaiveDate) -> Self {
        Self {
            wallets: Arc::new(RwLock::new(HashMap::new())),
            default_expiry,
        }
    }

    /// Creates a service preloaded with the demo wallets for `guest` and `jp`.
    pub fn seeded() -> Self {
        let mut wallets = HashMap::new();
        wallets.insert(
            Owner::guest(),
            vec![WalletCoupon::active("SAVE10", ymd(2025, 12, 31))],
        );
        wallets.insert(
            Owner::new("jp"),
            vec![
                WalletCoupon::active("SAVE10", ymd(2025, 12, 31)),
                WalletCoupon::active("WELCOME5", ymd(2026, 1, 1)),
            ],
        );

        Self {
            wallets: Arc::new(RwLock::new(wallets)),
            default_expiry: ymd(2025, 12, 31),
        }
    }

    /// Returns the coupons held by `owner`; unknown owners have none.
    pub async fn coupons(&self, owner: &Owner) -> Vec<WalletCoupon> {
        self.wallets
            .read()
            .await
            .get(owner)
            .cloned()
            .unwrap_or_default()
    }

    /// Adds an active coupon to `owner`'s wallet and returns the whole wallet.
    #[tracing::instrument(skip(self))]
    pub async fn add(&self, owner: &Owner, code: &str) -> Result<Vec<WalletCoupon>, WalletError> {
        if code.is_empty() {
            return Err(WalletError::MissingCode);
        }

        let mut wallets = self.wallets.write().await;
        let list = wallets.entry(owner.clone()).or_default();

        if list.iter().any(|c| c.code == code) {
            return Err(WalletError::AlreadyExists {
                code: code.to_string(),
            });
        }

        list.push(WalletCoupon::active(code, self.default_expiry));
        metrics::counter!("wallet_coupons_added_total").increment(1);
        tracing::info!(owner = %owner, code, "coupon added to wallet");

        Ok(list.clone())
    }

    /// Number of owners with a wallet.
    pub async fn user_count(&self) -> usize {
        self.wallets.read().await.len()
    }
}
