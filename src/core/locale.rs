//! Two-locale message dictionary.
//!
//! Messages are looked up by locale and a fixed key. A key that has no entry
//! is echoed back unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::order::{Priority, Status};
use crate::errors::{Error, Result};

/// Supported display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Arabic
    #[default]
    Ar,
    /// English
    En,
}

impl Locale {
    /// Every supported locale.
    pub const ALL: [Self; 2] = [Self::Ar, Self::En];

    /// Two-letter code stored under the locale key.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ar => "ar",
            Self::En => "en",
        }
    }

    const fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Ar => AR,
            Self::En => EN,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Validation {
                message: format!("unsupported language '{s}'"),
            })
    }
}

/// Looks up `key` for `locale`, returning the key itself when absent.
#[must_use]
pub fn t(locale: Locale, key: &str) -> &str {
    locale
        .table()
        .iter()
        .find(|(k, _)| *k == key)
        .map_or(key, |(_, v)| *v)
}

/// Localized label of a status.
#[must_use]
pub fn status_label(locale: Locale, status: Status) -> &'static str {
    match (locale, status) {
        (Locale::Ar, Status::New) => "جديد",
        (Locale::Ar, Status::Sent) => "أُرسل للمورد",
        (Locale::Ar, Status::Ack) => "تم الاستلام",
        (Locale::Ar, Status::Prep) => "قيد التجهيز",
        (Locale::Ar, Status::Delivered) => "تم التسليم",
        (Locale::Ar, Status::Cancelled) => "أُلغي",
        (Locale::En, Status::New) => "New",
        (Locale::En, Status::Sent) => "Sent to supplier",
        (Locale::En, Status::Ack) => "Acknowledged",
        (Locale::En, Status::Prep) => "Preparing",
        (Locale::En, Status::Delivered) => "Delivered",
        (Locale::En, Status::Cancelled) => "Cancelled",
    }
}

/// Localized label of a priority.
#[must_use]
pub const fn priority_label(locale: Locale, priority: Priority) -> &'static str {
    match (locale, priority) {
        (Locale::Ar, Priority::Low) => "منخفض",
        (Locale::Ar, Priority::Med) => "متوسط",
        (Locale::Ar, Priority::High) => "عاجل",
        (Locale::En, Priority::Low) => "Low",
        (Locale::En, Priority::Med) => "Medium",
        (Locale::En, Priority::High) => "Urgent",
    }
}

const AR: &[(&str, &str)] = &[
    ("title", "Olive – طلبات المواد"),
    ("help", "الطاقم يبلّغ عن المواد الناقصة عبر /report.\nالمدير يعيّن المورد ويرسل الطلب عبر /manage.\nالمورد يرى الطلبات الموجهة له ويحدث الحالة عبر /supplier."),
    ("orders", "الطلبات"),
    ("none", "—"),
    ("staff", "طاقم"),
    ("manager", "مدير"),
    ("supplier", "مورد"),
    ("qty", "الكمية"),
    ("unit", "الوحدة"),
    ("category", "الفئة"),
    ("priority", "أولوية"),
    ("status", "حالة"),
    ("neededBy", "بحاجة قبل"),
    ("notes", "ملاحظات"),
    ("eta", "وقت التسليم المتوقع"),
    ("added", "تمت الإضافة"),
    ("updated", "تم التحديث"),
    ("deleted", "تم الحذف"),
    ("sentCount", "عدد الطلبات المرسلة"),
    ("supplierBoard", "لوحة المورد"),
    ("noItemsYet", "لا توجد عناصر بعد."),
    ("noSupplierItems", "لا توجد طلبات حالياً لهذا المورد."),
    ("addSupplier", "إضافة مورد"),
    ("suppliersCount", "عدد الموردين"),
    ("languageSet", "تم تغيير اللغة"),
    ("invalidInput", "مدخلات غير صالحة"),
    ("notFound", "غير موجود"),
    ("notAllowed", "غير مسموح"),
];

const EN: &[(&str, &str)] = &[
    ("title", "Olive – Inventory Requests"),
    ("help", "Staff report shortages with /report.\nThe manager assigns suppliers and sends with /manage.\nSuppliers see assigned requests and update status with /supplier."),
    ("orders", "Orders"),
    ("none", "—"),
    ("staff", "Staff"),
    ("manager", "Manager"),
    ("supplier", "Supplier"),
    ("qty", "Qty"),
    ("unit", "Unit"),
    ("category", "Category"),
    ("priority", "Priority"),
    ("status", "Status"),
    ("neededBy", "Needed by"),
    ("notes", "Notes"),
    ("eta", "ETA"),
    ("added", "Added"),
    ("updated", "Updated"),
    ("deleted", "Deleted"),
    ("sentCount", "Orders sent"),
    ("supplierBoard", "Supplier Panel"),
    ("noItemsYet", "No items yet."),
    ("noSupplierItems", "No requests for this supplier yet."),
    ("addSupplier", "Add Supplier"),
    ("suppliersCount", "Suppliers"),
    ("languageSet", "Language changed"),
    ("invalidInput", "Invalid input"),
    ("notFound", "Not found"),
    ("notAllowed", "Not allowed"),
];

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_lookup_per_locale() {
        assert_eq!(t(Locale::En, "orders"), "Orders");
        assert_eq!(t(Locale::Ar, "orders"), "الطلبات");
    }

    #[test]
    fn test_missing_key_echoes_key() {
        assert_eq!(t(Locale::En, "noSuchKey"), "noSuchKey");
        assert_eq!(t(Locale::Ar, "noSuchKey"), "noSuchKey");
    }

    #[test]
    fn test_both_tables_share_keys() {
        for (key, _) in AR {
            assert!(EN.iter().any(|(k, _)| k == key), "missing English entry for {key}");
        }
        assert_eq!(AR.len(), EN.len());
    }

    #[test]
    fn test_parse_locale() {
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
    }
}
