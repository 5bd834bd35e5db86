// ==========================================
// 演示数据生成器
// ==========================================
// 用法: cargo run --bin generate_test_data [输出目录]
// 生成一套引用完整的非洲关键矿产样例数据（默认 ./data）
// 坐标为近似值，运营前需替换
// ==========================================

use std::fs;
use std::path::{Path, PathBuf};

fn write_table(dir: &Path, name: &str, lines: &[&str]) -> std::io::Result<()> {
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(dir.join(name), content)
}

fn main() -> std::io::Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("./data"));
    fs::create_dir_all(&out_dir)?;

    write_table(
        &out_dir,
        "countries.csv",
        &[
            "CountryID,CountryName,Region,GDP_BillionUSD,MiningRevenue_BillionUSD,KeyProjects",
            "CD,DR Congo,Central Africa,64.0,16.0,Kamoa-Kakula; Mutanda",
            "ZM,Zambia,Southern Africa,29.0,6.0,Kansanshi expansion",
            "ZA,South Africa,Southern Africa,377.0,20.0,Bushveld complex",
            "ZW,Zimbabwe,Southern Africa,27.0,3.5,Great Dyke lithium",
            "MA,Morocco,North Africa,134.0,7.2,Khouribga phosphates",
            "GN,Guinea,West Africa,21.0,4.1,Simandou iron ore",
        ],
    )?;

    write_table(
        &out_dir,
        "minerals.csv",
        &[
            "MineralID,MineralName,Unit,Description",
            "CO,Cobalt,t,Battery cathode metal",
            "CU,Copper,t,Conductor metal",
            "PT,Platinum,kg,Platinum group metal",
            "LI,Lithium,t,Battery metal (spodumene concentrate)",
            "P,Phosphate,t,Fertilizer feedstock",
            "BX,Bauxite,t,Aluminium ore",
        ],
    )?;

    write_table(
        &out_dir,
        "sites.csv",
        &[
            "SiteID,SiteName,CountryID,MineralID,Latitude,Longitude,Status,Production_tonnes",
            "S1,Mutanda,CD,CO,-10.7,25.5,ACTIVE,20000",
            "S2,Kamoa-Kakula,CD,CU,-10.8,25.4,ACTIVE,400000",
            "S3,Kansanshi,ZM,CU,-12.1,26.4,ACTIVE,250000",
            "S4,Mogalakwena,ZA,PT,-24.0,28.9,ACTIVE,1200",
            "S5,Bikita,ZW,LI,-20.1,31.4,ACTIVE,180000",
            "S6,Khouribga,MA,P,32.9,-6.9,ACTIVE,18000000",
            "S7,Sangaredi,GN,BX,11.1,-13.8,ACTIVE,9000000",
            "S8,Arcadia,ZW,LI,-17.9,31.3,PLANNED,0",
        ],
    )?;

    write_table(
        &out_dir,
        "production_stats.csv",
        &[
            "CountryID,MineralID,Year,Production_tonnes,ExportValue_BillionUSD,Source",
            "CD,CO,2021,120000,8.6,USGS 2022",
            "CD,CO,2022,150000,10.2,USGS 2023",
            "CD,CO,2023,170000,11.0,USGS 2024",
            "CD,CU,2022,2360000,15.4,USGS 2023",
            "CD,CU,2023,2840000,18.9,USGS 2024",
            "ZM,CO,2023,8000,0.4,USGS 2024",
            "ZM,CU,2022,770000,7.9,USGS 2023",
            "ZM,CU,2023,760000,8.1,USGS 2024",
            "ZA,PT,2022,140,4.2,USGS 2023",
            "ZA,PT,2023,120,3.9,USGS 2024",
            "ZW,LI,2022,710000,0.5,USGS 2023",
            "ZW,LI,2023,1200000,0.9,USGS 2024",
            "MA,P,2022,40000000,6.8,USGS 2023",
            "MA,P,2023,35000000,6.1,USGS 2024",
            "GN,BX,2022,86000000,3.6,USGS 2023",
            "GN,BX,2023,97000000,4.0,USGS 2024",
        ],
    )?;

    write_table(
        &out_dir,
        "roles.csv",
        &["RoleID,RoleName", "R1,Administrator", "R2,Researcher", "R3,Investor"],
    )?;

    write_table(
        &out_dir,
        "users.csv",
        &[
            "UserID,Username,Email,RoleID,CreatedAt",
            "1,admin,admin@minerals.local,R1,2025-11-02T08:00:00",
            "2,amina,amina@minerals.local,R2,2025-11-03T09:15:00",
            "3,tariq,tariq@minerals.local,R3,2025-11-05T14:40:00",
        ],
    )?;

    println!("样例数据已写入: {}", out_dir.display());
    Ok(())
}
