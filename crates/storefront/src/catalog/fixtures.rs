//! The static product fixture set.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use techstore_core::{Category, ProductId};

use super::{CameraSpecs, Product};

fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map_or_else(Utc::now, |dt| Utc.from_utc_datetime(&dt))
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: i32,
    name: &str,
    price: &str,
    original_price: &str,
    category: Category,
    rating: f32,
    reviews: u32,
    discount: &str,
    price_number: i64,
    created_at: DateTime<Utc>,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: price.to_string(),
        original_price: original_price.to_string(),
        image: "/placeholder.svg?height=200&width=200".to_string(),
        images: Vec::new(),
        category,
        rating,
        description: vec!["ok nhé".to_string()],
        camera_specs: None,
        reviews,
        discount: discount.to_string(),
        price_number,
        created_at,
        stock: 20,
    }
}

/// All fixture products, in catalog order.
pub(super) fn all_products() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new(1),
            name: "Camera HD Pro 4K".to_string(),
            price: "15,500,000".to_string(),
            original_price: "18,000,000".to_string(),
            image: "/img/camera.jpg".to_string(),
            images: vec![
                "/anhcon/1.jpg".to_string(),
                "/anhcon/2.jpg".to_string(),
                "/anhcon/3.jpg".to_string(),
            ],
            category: Category::Camera,
            rating: 4.5,
            description: vec![
                "Giải pháp bảo vệ không gian sống của bạn với mức giá hợp lý và nhiều chức \
                 năng ưu việt: quay video Full HD, xoay 360 độ linh hoạt, hồng ngoại nhìn \
                 đêm và nhận diện cử động con người."
                    .to_string(),
                "Tín hiệu quay chụp Full HD 1080p, hỗ trợ WDR, bắt khuôn hình ngược sáng \
                 rõ nét - trợ thủ quan sát bảo vệ không gian sống và làm việc mọi lúc."
                    .to_string(),
            ],
            camera_specs: Some(CameraSpecs {
                resolution: "3 MP (1080p)".to_string(),
                view_angle: "360 độ".to_string(),
                rotation_vertical: "42 độ".to_string(),
                rotation_horizontal: "76.7 độ".to_string(),
                rotation_diagonal: "89.7 độ".to_string(),
                night_vision: "12 m trong tối".to_string(),
                features: vec![
                    "Phát hiện chuyển động".to_string(),
                    "Phát hiện con người".to_string(),
                    "Phát hiện tiếng khóc".to_string(),
                    "Đàm thoại 2 chiều".to_string(),
                    "Tích hợp Google Assistant và Amazon Alexa".to_string(),
                ],
                two_way_audio: "Có".to_string(),
            }),
            reviews: 128,
            discount: "14%".to_string(),
            price_number: 15_500_000,
            created_at: date(2024, 1, 15),
            stock: 20,
        },
        product(
            2,
            "Dell Inspiron 15 3000",
            "12,990,000",
            "14,500,000",
            Category::Laptop,
            4.3,
            89,
            "10%",
            12_990_000,
            date(2024, 1, 10),
        ),
        product(
            3,
            "Lenovo ThinkPad X1",
            "25,900,000",
            "28,000,000",
            Category::Laptop,
            4.8,
            156,
            "8%",
            25_900_000,
            date(2024, 1, 20),
        ),
        product(
            4,
            "Canon EOS R6 Mark II",
            "45,000,000",
            "48,500,000",
            Category::Camera,
            4.9,
            203,
            "7%",
            45_000_000,
            date(2024, 1, 25),
        ),
        product(
            5,
            "MacBook Pro M3",
            "52,990,000",
            "55,000,000",
            Category::Laptop,
            4.7,
            312,
            "4%",
            52_990_000,
            date(2024, 1, 30),
        ),
        product(
            6,
            "Sony Alpha A7 IV",
            "38,900,000",
            "42,000,000",
            Category::Camera,
            4.6,
            178,
            "7%",
            38_900_000,
            date(2024, 2, 1),
        ),
        product(
            7,
            "Dell XPS 13",
            "28,500,000",
            "32,000,000",
            Category::Laptop,
            4.4,
            95,
            "11%",
            28_500_000,
            date(2024, 2, 5),
        ),
        product(
            8,
            "Lenovo Legion 5",
            "22,900,000",
            "25,000,000",
            Category::Laptop,
            4.5,
            142,
            "8%",
            22_900_000,
            date(2024, 2, 10),
        ),
        product(
            9,
            "Nikon D850",
            "35,500,000",
            "38,000,000",
            Category::Camera,
            4.7,
            167,
            "7%",
            35_500_000,
            date(2024, 2, 15),
        ),
        product(
            10,
            "HP Pavilion Gaming",
            "18,900,000",
            "21,000,000",
            Category::Laptop,
            4.2,
            78,
            "10%",
            18_900_000,
            date(2024, 2, 20),
        ),
        product(
            11,
            "Fujifilm X-T5",
            "42,500,000",
            "45,000,000",
            Category::Camera,
            4.8,
            134,
            "6%",
            42_500_000,
            date(2024, 2, 25),
        ),
        product(
            12,
            "ASUS ROG Strix",
            "31,900,000",
            "35,000,000",
            Category::Laptop,
            4.6,
            189,
            "9%",
            31_900_000,
            date(2024, 3, 1),
        ),
        product(
            13,
            "Chuột Gaming Logitech",
            "1,200,000",
            "1,500,000",
            Category::Accessory,
            4.3,
            45,
            "20%",
            1_200_000,
            date(2024, 3, 5),
        ),
        product(
            14,
            "Bàn phím cơ RGB",
            "2,800,000",
            "3,200,000",
            Category::Accessory,
            4.5,
            67,
            "13%",
            2_800_000,
            date(2024, 3, 10),
        ),
        product(
            15,
            "Tai nghe Gaming",
            "3,500,000",
            "4,000,000",
            Category::Accessory,
            4.4,
            89,
            "13%",
            3_500_000,
            date(2024, 3, 15),
        ),
    ]
}
