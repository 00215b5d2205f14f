//! Rendering of the balloon description and the structured key/value block

use crate::config::RegistryConfig;
use crate::extract::AREA_UNIT;
use crate::record::ParcelRecord;

/// Keys of the structured block, in output order
pub const STRUCTURED_KEYS: [&str; 18] = [
    "owner_name",
    "owner_name_ar",
    "parcel_no",
    "area",
    "area_text",
    "property_type",
    "province",
    "district",
    "directorate",
    "street",
    "full_address",
    "registration_date",
    "daily_register_no",
    "share_text",
    "transaction_type",
    "price",
    "lat",
    "lng",
];

/// `1234567` -> `1,234,567`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Neighborhood without its parenthetical (other-script) suffix
pub fn district(neighborhood: &str) -> &str {
    neighborhood.split('(').next().unwrap_or_default().trim()
}

/// Flat key/value list covering every field of the record
pub fn structured_entries(
    record: &ParcelRecord,
    registry: &RegistryConfig,
) -> Vec<(&'static str, String)> {
    let fields = &record.fields;
    let values = [
        record.derived.owner_latin.clone(),
        record.drawn.owner_arabic.clone(),
        record.parcel_no.clone(),
        fields.area.clone(),
        format!("{} {}", fields.area, AREA_UNIT),
        record.derived.classification.secondary.to_string(),
        registry.province.clone(),
        district(&fields.neighborhood).to_string(),
        registry.directorate.clone(),
        fields.street.clone(),
        fields.full_address.clone(),
        record.drawn.registration_date.clone(),
        record.drawn.registry_reference.clone(),
        record.drawn.share.text(&registry.full_ownership),
        registry.transaction_type.clone(),
        record.drawn.price.to_string(),
        fields.latitude.clone(),
        fields.longitude.clone(),
    ];
    STRUCTURED_KEYS.into_iter().zip(values).collect()
}

/// Fixed-layout HTML balloon: header, then owner, property, location and
/// registration sections
pub fn description(record: &ParcelRecord, registry: &RegistryConfig) -> String {
    let fields = &record.fields;
    let classification = record.derived.classification;
    let price = format!("{}{}", registry.currency_symbol, group_thousands(record.drawn.price));

    format!(
        r##"
<div style="font-family: Arial, sans-serif; font-size: 12px; max-width: 320px; padding: 8px;">
<div style="background: #1e293b; color: white; padding: 12px; border-radius: 8px 8px 0 0; margin: -8px -8px 12px -8px;">
<div style="font-size: 16px; font-weight: bold;">📍 Parsel #{parcel_no}</div>
<div style="font-size: 10px; color: #94a3b8; margin-top: 4px;">{directorate}</div>
</div>

<table style="width: 100%; border-collapse: collapse;">
<tr style="background: #f1f5f9;"><td colspan="2" style="padding: 6px; font-weight: bold; color: #059669;">👤 MALİK BİLGİLERİ</td></tr>
<tr><td style="padding: 4px; color: #64748b; width: 40%;">Malik (TR):</td><td style="padding: 4px; font-weight: bold;">{owner_latin}</td></tr>
<tr><td style="padding: 4px; color: #64748b;">Malik (AR):</td><td style="padding: 4px; font-weight: bold; direction: rtl;">{owner_arabic}</td></tr>
<tr><td style="padding: 4px; color: #64748b;">Hisse:</td><td style="padding: 4px;">{share}</td></tr>

<tr style="background: #f1f5f9;"><td colspan="2" style="padding: 6px; font-weight: bold; color: #2563eb;">🏠 TAŞINMAZ BİLGİLERİ</td></tr>
<tr><td style="padding: 4px; color: #64748b;">Kadastro No:</td><td style="padding: 4px; font-weight: bold; color: #dc2626;">{parcel_no}</td></tr>
<tr><td style="padding: 4px; color: #64748b;">Nitelik:</td><td style="padding: 4px;">{class_secondary} / {class_local}</td></tr>
<tr><td style="padding: 4px; color: #64748b;">Yüzölçümü:</td><td style="padding: 4px; font-weight: bold;">{area} {unit}</td></tr>
<tr><td style="padding: 4px; color: #64748b;">Rayiç Bedel:</td><td style="padding: 4px; font-weight: bold; color: #059669;">{price}</td></tr>

<tr style="background: #f1f5f9;"><td colspan="2" style="padding: 6px; font-weight: bold; color: #7c3aed;">📍 KONUM BİLGİLERİ</td></tr>
<tr><td style="padding: 4px; color: #64748b;">İl:</td><td style="padding: 4px;">{province}</td></tr>
<tr><td style="padding: 4px; color: #64748b;">Mahalle:</td><td style="padding: 4px;">{neighborhood}</td></tr>
<tr><td style="padding: 4px; color: #64748b;">Sokak:</td><td style="padding: 4px; direction: rtl;">{street}</td></tr>
<tr><td style="padding: 4px; color: #64748b;">Tam Adres:</td><td style="padding: 4px; direction: rtl;">{full_address}</td></tr>
<tr><td style="padding: 4px; color: #64748b;">Enlem:</td><td style="padding: 4px; font-size: 10px;">{latitude}</td></tr>
<tr><td style="padding: 4px; color: #64748b;">Boylam:</td><td style="padding: 4px; font-size: 10px;">{longitude}</td></tr>

<tr style="background: #f1f5f9;"><td colspan="2" style="padding: 6px; font-weight: bold; color: #ea580c;">📋 TESCİL BİLGİLERİ</td></tr>
<tr><td style="padding: 4px; color: #64748b;">Tescil Tarihi:</td><td style="padding: 4px;">{registration_date}</td></tr>
<tr><td style="padding: 4px; color: #64748b;">Yevmiye No:</td><td style="padding: 4px; font-family: monospace;">{reference}</td></tr>
<tr><td style="padding: 4px; color: #64748b;">İşlem Türü:</td><td style="padding: 4px;">{transaction}</td></tr>
</table>

<div style="background: #fef3c7; padding: 8px; border-radius: 4px; margin-top: 12px; font-size: 10px; color: #92400e;">
{notice}
</div>
</div>
"##,
        parcel_no = record.parcel_no,
        directorate = registry.directorate,
        owner_latin = record.derived.owner_latin,
        owner_arabic = record.drawn.owner_arabic,
        share = record.drawn.share.text(&registry.full_ownership),
        class_secondary = classification.secondary,
        class_local = classification.local,
        area = fields.area,
        unit = AREA_UNIT,
        price = price,
        province = registry.province_display,
        neighborhood = fields.neighborhood,
        street = fields.street,
        full_address = fields.full_address,
        latitude = fields.latitude,
        longitude = fields.longitude,
        registration_date = record.drawn.registration_date,
        reference = record.drawn.registry_reference,
        transaction = registry.transaction_display,
        notice = registry.notice,
    )
}
