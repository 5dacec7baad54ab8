/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let cities = [
        "sao paulo",
        "rio de janeiro",
        "belo horizonte",
        "curitiba",
        "porto alegre",
        "salvador",
    ];
    let statuses = ["delivered", "delivered", "delivered", "shipped", "canceled"];
    let payment_types = ["credit_card", "credit_card", "boleto", "voucher", "debit_card"];
    let categories = [
        "cama_mesa_banho",
        "beleza_saude",
        "esporte_lazer",
        "moveis_decoracao",
        "informatica_acessorios",
        "brinquedos",
    ];

    let output_path = "sample_orders.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "order_id",
            "customer_id",
            "seller_id",
            "seller_city",
            "order_status",
            "payment_type",
            "payment_value",
            "product_category_name",
            "order_purchase_timestamp",
        ])
        .expect("Failed to write header");

    let n_orders = 500;
    let mut rows = 0usize;
    for order_no in 0..n_orders {
        let order_id = format!("order_{order_no:05}");
        // Skew toward repeat customers so the RFM panels have spread.
        let customer_id = format!("customer_{:04}", rng.next_u64() % 180);
        let seller_no = rng.next_u64() % 40;
        let seller_id = format!("seller_{seller_no:03}");
        let city = cities[(seller_no % cities.len() as u64) as usize];
        let status = *rng.pick(&statuses);
        let payment = *rng.pick(&payment_types);

        // Purchase instants spread over 2023-01-01 .. 2024-06-30.
        let minute = rng.next_u64() % (546 * 24 * 60);
        let day = minute / (24 * 60);
        let (year, month, dom) = date_from_day_offset(day as u32);
        let hh = (minute / 60) % 24;
        let mm = minute % 60;
        let ts = format!("{year:04}-{month:02}-{dom:02} {hh:02}:{mm:02}:00");

        // ~10% of rows carry no category, like the source export.
        let category = if rng.next_f64() < 0.1 {
            ""
        } else {
            *rng.pick(&categories)
        };

        // One or two payment rows per order.
        let installments = if rng.next_f64() < 0.15 { 2 } else { 1 };
        for _ in 0..installments {
            let value = format!("{:.2}", 10.0 + rng.next_f64() * 390.0);
            writer
                .write_record([
                    order_id.as_str(),
                    customer_id.as_str(),
                    seller_id.as_str(),
                    city,
                    status,
                    payment,
                    value.as_str(),
                    category,
                    ts.as_str(),
                ])
                .expect("Failed to write row");
            rows += 1;
        }
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {rows} payment rows for {n_orders} orders to {output_path}");
}

/// Map a day offset from 2023-01-01 to (year, month, day), Gregorian.
fn date_from_day_offset(mut days: u32) -> (i32, u32, u32) {
    let month_lengths = |year: i32| -> [u32; 12] {
        let feb = if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) {
            29
        } else {
            28
        };
        [31, feb, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    };

    let mut year = 2023;
    loop {
        let lengths = month_lengths(year);
        let year_len: u32 = lengths.iter().sum();
        if days < year_len {
            for (i, len) in lengths.iter().enumerate() {
                if days < *len {
                    return (year, i as u32 + 1, days + 1);
                }
                days -= len;
            }
        }
        days -= year_len;
        year += 1;
    }
}
