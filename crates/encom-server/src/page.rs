pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>ENCOM Invoice Converter</title>
    <style>
        body {
            background-color: #5a3a22;
            height: 100vh;
            margin: 0;
            display: flex;
            flex-direction: column;
            justify-content: flex-end;
            align-items: center;
            padding-bottom: 15vh;
            font-family: sans-serif;
        }
        .container {
            background-color: rgba(255, 255, 255, 0.9);
            padding: 40px;
            border-radius: 12px;
            box-shadow: 0 8px 16px rgba(0, 0, 0, 0.3);
            text-align: center;
            max-width: 500px;
            width: 90%;
        }
        h1 { color: #5a3a22; margin-top: 0; font-size: 24px; }
        p { color: #333; }
        .upload-btn {
            background-color: #5a3a22;
            color: white;
            padding: 12px 24px;
            border: none;
            border-radius: 6px;
            cursor: pointer;
            font-size: 16px;
            font-weight: bold;
            margin-top: 20px;
        }
        .upload-btn:hover { background-color: #3e2615; }
        input[type="file"] { margin-top: 20px; font-size: 15px; }
    </style>
</head>
<body>
    <div class="container">
        <h1>ENCOM Excel Converter</h1>
        <p>Upload an invoice PDF and the extracted line items<br>download as an Excel workbook.</p>
        <form action="/upload" method="post" enctype="multipart/form-data">
            <input type="file" name="file" accept=".pdf" required>
            <br>
            <button type="submit" class="upload-btn">Convert and download</button>
        </form>
    </div>
</body>
</html>
"#;
